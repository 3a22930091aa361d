// metamerge - app/state.rs
//
// Application state: the two presentation components plus view flags.
// Owned by the eframe::App implementation; every mutation happens on the
// UI thread in response to a drained event or completion message.

use crate::app::sync::SettingsSync;
use crate::core::log_view::LogView;
use crate::core::model::{BackendEvent, SyncProgress};
use crate::core::settings::SettingsDocument;
use crate::util::constants::{EXIF_TAG_CONTROL_IDS, GENERAL_CONTROL_IDS};

/// Top-level application state.
pub struct AppState {
    /// Log area component.
    pub log_view: LogView,

    /// Settings synchronization component.
    pub settings_sync: SettingsSync,

    /// Document snapshots queued by settings edits, one per edit, each
    /// carrying the mirror as of immediately after that edit. Drained by
    /// the gui update loop into the sync manager.
    pub pending_pushes: Vec<SettingsDocument>,

    /// False once the backend reports ExifTool missing; switches the UI
    /// to the blocking warning view.
    pub exiftool_ok: bool,

    /// Status message for the status bar.
    pub status_message: String,

    /// UI body font size in points.
    pub ui_font_size: f32,
}

impl AppState {
    /// Create initial state: empty log view, placeholder settings mirror,
    /// the standard control registry, and the main view visible.
    pub fn new(ui_font_size: f32) -> Self {
        Self {
            log_view: LogView::new(),
            settings_sync: SettingsSync::new(
                GENERAL_CONTROL_IDS.iter().copied(),
                EXIF_TAG_CONTROL_IDS.iter().copied(),
            ),
            pending_pushes: Vec::new(),
            exiftool_ok: true,
            status_message: "Ready. Waiting for the merge backend.".to_string(),
            ui_font_size,
        }
    }

    /// Apply one typed backend event.
    pub fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::Log { level, message } => {
                self.log_view.append(level, message);
            }
            BackendEvent::ExiftoolStatus(available) => {
                if !available {
                    tracing::warn!("ExifTool not found on PATH");
                    self.exiftool_ok = false;
                } else {
                    tracing::info!("ExifTool found");
                }
            }
        }
    }

    /// Apply one settings-service completion message.
    pub fn handle_sync_progress(&mut self, progress: SyncProgress) {
        match progress {
            SyncProgress::Fetched(document) => {
                self.settings_sync.apply_fetched(document);
                self.status_message = "Settings loaded.".to_string();
            }
            SyncProgress::FetchFailed { error } => {
                // Mirror keeps its placeholder; no automatic retry.
                tracing::error!(error = %error, "Settings fetch failed");
                self.status_message = format!("Settings could not be loaded: {error}");
            }
            SyncProgress::PushCompleted => {
                tracing::info!("Settings updated");
            }
            SyncProgress::PushFailed { error } => {
                // Optimistic: the mirror is not rolled back.
                tracing::error!(error = %error, "Settings update failed");
                self.status_message = format!("Settings could not be saved: {error}");
            }
        }
    }
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::settings::SettingsDocument;

    #[test]
    fn test_log_event_appends_to_view() {
        let mut state = AppState::new(14.5);
        state.handle_backend_event(BackendEvent::Log {
            level: "info".to_string(),
            message: "merge started".to_string(),
        });
        assert_eq!(state.log_view.len(), 1);
        assert!(state.log_view.render()[0].ends_with("[INFO] merge started"));
    }

    #[test]
    fn test_exiftool_missing_switches_to_warning_view() {
        let mut state = AppState::new(14.5);
        assert!(state.exiftool_ok);
        state.handle_backend_event(BackendEvent::ExiftoolStatus(true));
        assert!(state.exiftool_ok);
        state.handle_backend_event(BackendEvent::ExiftoolStatus(false));
        assert!(!state.exiftool_ok);
    }

    #[test]
    fn test_fetch_failure_keeps_placeholder_mirror() {
        let mut state = AppState::new(14.5);
        state.handle_sync_progress(SyncProgress::FetchFailed {
            error: "service unreachable".to_string(),
        });
        assert!(!state.settings_sync.is_loaded());
        assert_eq!(state.settings_sync.mirror(), &SettingsDocument::default());
        assert!(state.status_message.contains("service unreachable"));
    }

    #[test]
    fn test_push_failure_does_not_roll_back_mirror() {
        let mut state = AppState::new(14.5);
        state
            .settings_sync
            .apply_fetched(SettingsDocument::default());
        let snapshot = state.settings_sync.edit(
            "editedSuffix",
            crate::core::settings::FieldValue::Text("-kept".to_string()),
        );
        state.handle_sync_progress(SyncProgress::PushFailed {
            error: "disk full".to_string(),
        });
        assert_eq!(state.settings_sync.mirror(), &snapshot);
    }
}
