// metamerge - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use chrono::{DateTime, Local};
use serde::Deserialize;

// =============================================================================
// Log record
// =============================================================================

/// A single log event received from the backend.
///
/// The level is an opaque category supplied by the sender; it is used only
/// for display styling (via [`Severity::classify`]) and uppercased in the
/// rendered line. Records are immutable once created and owned exclusively
/// by the log view's history.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Raw level string as sent by the backend (e.g. "info", "error").
    pub level: String,

    /// Message text.
    pub message: String,

    /// Wall-clock time captured when the record was received.
    pub timestamp: DateTime<Local>,
}

impl LogRecord {
    /// Create a record stamped with the current local time.
    pub fn now(level: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            message: message.into(),
            timestamp: Local::now(),
        }
    }

    /// Render this record as a single display line:
    /// `<localized-time> [<LEVEL-UPPERCASED>] <message>`.
    pub fn display_line(&self) -> String {
        format!(
            "{} [{}] {}",
            self.timestamp
                .format(crate::util::constants::LOG_TIME_FORMAT),
            self.level.to_uppercase(),
            self.message
        )
    }

    /// Severity category derived from the raw level string, for styling.
    pub fn severity(&self) -> Severity {
        Severity::classify(&self.level)
    }
}

// =============================================================================
// Severity
// =============================================================================

/// Display-styling category derived from a record's free-form level string.
///
/// Classification never changes the rendered text -- the raw level string is
/// what appears in the line -- it only selects a row colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Debug,
    #[default]
    Unknown,
}

impl Severity {
    /// Map a raw level string to a severity category (case-insensitive).
    ///
    /// Unrecognised levels fall through to `Unknown` and are rendered with
    /// the neutral colour.
    pub fn classify(raw_level: &str) -> Self {
        match raw_level.to_lowercase().as_str() {
            "error" | "err" | "fatal" => Severity::Error,
            "warn" | "warning" => Severity::Warning,
            "info" => Severity::Info,
            "debug" | "trace" => Severity::Debug,
            _ => Severity::Unknown,
        }
    }
}

// =============================================================================
// Display mode
// =============================================================================

/// Whether the log view shows only the latest record or the full history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Show only the most recent record.
    #[default]
    Collapsed,

    /// Show the entire history in chronological order.
    Expanded,
}

// =============================================================================
// Backend events (inbound)
// =============================================================================

/// Typed form of the named JSON events the backend emits over the
/// event transport.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendEvent {
    /// A log line to append to the log area.
    Log { level: String, message: String },

    /// Whether the external ExifTool binary is available. `false` switches
    /// the UI to the blocking warning view.
    ExiftoolStatus(bool),
}

/// Wire shape of the `log` event payload.
#[derive(Debug, Deserialize)]
struct LogPayload {
    level: String,
    message: String,
}

impl BackendEvent {
    /// Decode a raw `(name, payload)` event into its typed form.
    ///
    /// Returns `None` for unknown event names or undecodable payloads --
    /// the transport may carry events this layer does not consume.
    pub fn decode(name: &str, payload: &serde_json::Value) -> Option<Self> {
        use crate::util::constants::{EVENT_EXIFTOOL_STATUS, EVENT_LOG};

        match name {
            EVENT_LOG => {
                let p: LogPayload = serde_json::from_value(payload.clone())
                    .map_err(|e| {
                        tracing::warn!(error = %e, "Undecodable log event payload");
                    })
                    .ok()?;
                Some(Self::Log {
                    level: p.level,
                    message: p.message,
                })
            }
            EVENT_EXIFTOOL_STATUS => {
                let status = payload.as_bool().or_else(|| {
                    tracing::warn!(payload = %payload, "Non-boolean exiftoolStatus payload");
                    None
                })?;
                Some(Self::ExiftoolStatus(status))
            }
            _ => None,
        }
    }
}

// =============================================================================
// Sync progress (completions of fire-and-forget service calls)
// =============================================================================

/// Completion messages sent from background settings-service calls to the
/// UI thread. Delivered over an mpsc channel and drained each frame.
#[derive(Debug)]
pub enum SyncProgress {
    /// The startup fetch resolved with the remote document.
    Fetched(crate::core::settings::SettingsDocument),

    /// The startup fetch failed; the mirror keeps its placeholder value.
    FetchFailed { error: String },

    /// An update push completed successfully.
    PushCompleted,

    /// An update push failed; the mirror is NOT rolled back.
    PushFailed { error: String },
}

// =============================================================================
// Unit tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_severity_classify_known_levels() {
        assert_eq!(Severity::classify("error"), Severity::Error);
        assert_eq!(Severity::classify("ERROR"), Severity::Error);
        assert_eq!(Severity::classify("warning"), Severity::Warning);
        assert_eq!(Severity::classify("info"), Severity::Info);
        assert_eq!(Severity::classify("debug"), Severity::Debug);
    }

    #[test]
    fn test_severity_classify_unknown_level_is_opaque() {
        assert_eq!(Severity::classify("notice"), Severity::Unknown);
        assert_eq!(Severity::classify(""), Severity::Unknown);
    }

    /// The rendered line uppercases the raw level but never rewrites it.
    #[test]
    fn test_display_line_preserves_raw_level() {
        let record = LogRecord::now("notice", "custom level passes through");
        let line = record.display_line();
        assert!(line.contains("[NOTICE]"), "got: {line}");
        assert!(line.ends_with("custom level passes through"));
    }

    #[test]
    fn test_decode_log_event() {
        let payload = json!({"level": "info", "message": "started"});
        let event = BackendEvent::decode("log", &payload);
        assert_eq!(
            event,
            Some(BackendEvent::Log {
                level: "info".to_string(),
                message: "started".to_string()
            })
        );
    }

    #[test]
    fn test_decode_exiftool_status_event() {
        assert_eq!(
            BackendEvent::decode("exiftoolStatus", &json!(false)),
            Some(BackendEvent::ExiftoolStatus(false))
        );
    }

    /// Unknown event names are not an error -- other consumers may exist.
    #[test]
    fn test_decode_unknown_event_returns_none() {
        assert_eq!(BackendEvent::decode("time", &json!("12:00:00")), None);
    }

    #[test]
    fn test_decode_malformed_log_payload_returns_none() {
        assert_eq!(BackendEvent::decode("log", &json!({"level": "info"})), None);
        assert_eq!(BackendEvent::decode("exiftoolStatus", &json!("yes")), None);
    }
}
