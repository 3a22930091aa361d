// metamerge - app/sync.rs
//
// Settings synchronization with the settings service.
//
// Split into two pieces:
//   - `SettingsSync` -- the single-threaded mirror of the settings document
//     plus the registered control set. Mutated only from UI edit handlers
//     and fetch completions, which run to completion on the UI thread.
//   - `SyncManager` -- the async boundary. Fetch and push run on background
//     threads and report completions as `SyncProgress` messages over an
//     mpsc channel the UI drains each frame (same pattern as the event
//     bridge). Fire-and-forget: nothing is cancelled or coalesced, and
//     in-flight pushes may complete in any order.
//
// The mirror always reflects the latest user intent: push failures are
// logged but never rolled back, and the backend never partially merges
// into the mirror after the startup fetch.

use crate::core::model::SyncProgress;
use crate::core::settings::{EditTarget, FieldValue, SettingsDocument};
use crate::util::error::ServiceError;
use std::collections::BTreeSet;
use std::sync::mpsc;
use std::sync::Arc;

// =============================================================================
// Service boundary
// =============================================================================

/// The remote settings service: owns the durable document.
///
/// Calls are blocking; `SyncManager` moves them off the UI thread.
pub trait SettingsService: Send + Sync {
    /// Retrieve the complete settings document.
    fn fetch(&self) -> Result<SettingsDocument, ServiceError>;

    /// Replace the durable document with `document`. There is no
    /// partial-update variant.
    fn update(&self, document: &SettingsDocument) -> Result<(), ServiceError>;
}

// =============================================================================
// SettingsSync (mirror + control registry)
// =============================================================================

/// In-memory mirror of the settings document, bound to a fixed set of
/// addressable controls.
#[derive(Debug)]
pub struct SettingsSync {
    mirror: SettingsDocument,
    control_ids: BTreeSet<String>,
    nested_control_ids: BTreeSet<String>,
    loaded: bool,
}

impl SettingsSync {
    /// Register the addressable controls. The mirror starts as the empty
    /// placeholder document until the startup fetch resolves.
    pub fn new<'a>(
        control_ids: impl IntoIterator<Item = &'a str>,
        nested_control_ids: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        Self {
            mirror: SettingsDocument::default(),
            control_ids: control_ids.into_iter().map(str::to_string).collect(),
            nested_control_ids: nested_control_ids.into_iter().map(str::to_string).collect(),
            loaded: false,
        }
    }

    /// Replace the mirror wholesale with the fetched document.
    pub fn apply_fetched(&mut self, document: SettingsDocument) {
        self.mirror = document;
        self.loaded = true;
        tracing::info!(
            fields = self.mirror.fields.len(),
            tags = self.mirror.exif_tags.len(),
            "Settings received"
        );
    }

    /// Whether the startup fetch has resolved.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Current mirror state (latest user intent).
    pub fn mirror(&self) -> &SettingsDocument {
        &self.mirror
    }

    /// Displayed value for a registered flat control: present keys bind,
    /// unregistered ids and absent keys leave the control untouched.
    pub fn display_value(&self, id: &str) -> Option<&FieldValue> {
        if !self.control_ids.contains(id) {
            return None;
        }
        self.mirror.field(id)
    }

    /// Checked state for a registered nested tag control.
    pub fn tag_checked(&self, id: &str) -> Option<bool> {
        if !self.nested_control_ids.contains(id) {
            return None;
        }
        self.mirror.tag(id)
    }

    /// Apply one control edit and return the post-edit document snapshot
    /// for the caller to push.
    ///
    /// Classification is by tag-map membership only -- the registered sets
    /// play no part here, so a change on an unregistered control still
    /// lands in the flat map.
    pub fn edit(&mut self, id: &str, value: FieldValue) -> SettingsDocument {
        let target = self.mirror.apply_edit(id, value);
        match target {
            EditTarget::NestedTag => tracing::debug!(id, "Settings edit: exif tag"),
            EditTarget::FlatField => tracing::debug!(id, "Settings edit: field"),
        }
        self.mirror.clone()
    }
}

// =============================================================================
// SyncManager (async fetch/push boundary)
// =============================================================================

/// Runs settings-service calls on background threads and surfaces their
/// completions to the UI as [`SyncProgress`] messages.
pub struct SyncManager {
    service: Arc<dyn SettingsService>,
    /// Channel receiver for the UI to poll completion messages.
    pub progress_rx: mpsc::Receiver<SyncProgress>,
    progress_tx: mpsc::Sender<SyncProgress>,
    fetch_issued: bool,
}

impl SyncManager {
    pub fn new(service: Arc<dyn SettingsService>) -> Self {
        let (progress_tx, progress_rx) = mpsc::channel();
        Self {
            service,
            progress_rx,
            progress_tx,
            fetch_issued: false,
        }
    }

    /// Issue the startup fetch. Exactly one fetch is ever issued; later
    /// calls are no-ops.
    pub fn start_fetch(&mut self) {
        if self.fetch_issued {
            return;
        }
        self.fetch_issued = true;

        let service = Arc::clone(&self.service);
        let tx = self.progress_tx.clone();
        std::thread::spawn(move || {
            let msg = match service.fetch() {
                Ok(document) => SyncProgress::Fetched(document),
                Err(e) => SyncProgress::FetchFailed {
                    error: e.to_string(),
                },
            };
            let _ = tx.send(msg);
        });
        tracing::debug!("Settings fetch issued");
    }

    /// Push the full document to the service, fire-and-forget.
    ///
    /// Each edit produces its own push; in-flight pushes are neither
    /// cancelled nor coalesced, and completion order is whatever the
    /// threads happen to produce.
    pub fn push(&self, document: SettingsDocument) {
        let service = Arc::clone(&self.service);
        let tx = self.progress_tx.clone();
        std::thread::spawn(move || {
            let msg = match service.update(&document) {
                Ok(()) => SyncProgress::PushCompleted,
                Err(e) => SyncProgress::PushFailed {
                    error: e.to_string(),
                },
            };
            let _ = tx.send(msg);
        });
    }

    /// Poll for pending completion messages without blocking.
    pub fn poll_progress(&self) -> Vec<SyncProgress> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.progress_rx.try_recv() {
            messages.push(msg);
        }
        messages
    }
}

// =============================================================================
// Unit tests
// =============================================================================
