// metamerge - app/store.rs
//
// Durable settings store: the concrete `SettingsService` the application
// wires up at startup. Holds the settings document as a JSON file in the
// platform config directory.
//
// Design principles:
// - The document is saved atomically (write→temp, rename→final) so a
//   crash during save never corrupts the previous good document.
// - A missing or empty file is first-run: a default document is created
//   and returned. A present-but-corrupt file is a fetch failure -- the
//   caller keeps its placeholder and the user keeps their file for
//   inspection rather than having it silently overwritten.
// - The config directory is created on first save; no user action needed.

use crate::app::sync::SettingsService;
use crate::core::settings::{FieldValue, SettingsDocument};
use crate::util::constants::EXIF_TAG_CONTROL_IDS;
use crate::util::error::ServiceError;
use std::path::{Path, PathBuf};

/// JSON-file-backed settings service.
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the durable document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The document written on first run.
    ///
    /// Timezone offset defaults to the machine's current UTC offset in
    /// `+HHMM` form, matching what the merge engine expects.
    pub fn default_document() -> SettingsDocument {
        let mut doc = SettingsDocument::default();
        doc.fields
            .insert("editedSuffix".into(), FieldValue::Text("edited".into()));
        doc.fields
            .insert("ignoreMinorErrors".into(), FieldValue::Bool(false));
        doc.fields.insert(
            "timezoneOffset".into(),
            FieldValue::Text(chrono::Local::now().format("%z").to_string()),
        );
        doc.fields
            .insert("inferTimezoneFromGPS".into(), FieldValue::Bool(true));
        doc.fields
            .insert("overwriteExistingTags".into(), FieldValue::Bool(true));
        for tag in EXIF_TAG_CONTROL_IDS {
            doc.exif_tags.insert((*tag).to_string(), true);
        }
        doc
    }

    /// Write `document` to `self.path` atomically.
    fn save(&self, document: &SettingsDocument) -> Result<(), ServiceError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ServiceError::Io {
                path: parent.to_path_buf(),
                operation: "create settings directory",
                source: e,
            })?;
        }

        let json =
            serde_json::to_string_pretty(document).map_err(|e| ServiceError::Encode {
                operation: "settings save",
                source: e,
            })?;

        // Atomic write: temp file then rename. A crash between the two
        // loses the new document but never corrupts the previous one.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json.as_bytes()).map_err(|e| ServiceError::Io {
            path: tmp.clone(),
            operation: "write settings temp file",
            source: e,
        })?;

        std::fs::rename(&tmp, &self.path).map_err(|e| {
            let _ = std::fs::remove_file(&tmp);
            ServiceError::Io {
                path: self.path.clone(),
                operation: "finalise settings file",
                source: e,
            }
        })?;

        tracing::debug!(path = %self.path.display(), "Settings saved");
        Ok(())
    }
}

impl SettingsService for JsonSettingsStore {
    fn fetch(&self) -> Result<SettingsDocument, ServiceError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // First run: materialise the default document.
                tracing::info!(path = %self.path.display(), "No settings file; creating defaults");
                let doc = Self::default_document();
                self.save(&doc)?;
                return Ok(doc);
            }
            Err(e) => {
                return Err(ServiceError::Io {
                    path: self.path.clone(),
                    operation: "read settings file",
                    source: e,
                });
            }
        };

        if content.trim().is_empty() {
            tracing::info!(path = %self.path.display(), "Settings file is empty; creating defaults");
            let doc = Self::default_document();
            self.save(&doc)?;
            return Ok(doc);
        }

        let doc: SettingsDocument =
            serde_json::from_str(&content).map_err(|e| ServiceError::Decode {
                operation: "settings fetch",
                source: e,
            })?;

        tracing::info!(path = %self.path.display(), "Settings file loaded");
        Ok(doc)
    }

    fn update(&self, document: &SettingsDocument) -> Result<(), ServiceError> {
        self.save(document)
    }
}

// =============================================================================
// Unit tests
// =============================================================================
