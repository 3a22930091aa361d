// metamerge - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "metamerge";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "metamerge";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Settings controls
// =============================================================================

/// Field identifiers of the general (flat) settings controls.
///
/// Each id doubles as the key of the corresponding field in the settings
/// document, so a control and its document field never drift apart.
pub const GENERAL_CONTROL_IDS: &[&str] = &[
    "editedSuffix",
    "ignoreMinorErrors",
    "timezoneOffset",
    "inferTimezoneFromGPS",
    "overwriteExistingTags",
];

/// Field identifiers of the ExifTag checkbox controls, keyed into the
/// document's `exifTags` sub-map.
pub const EXIF_TAG_CONTROL_IDS: &[&str] = &["title", "description", "dateTaken", "URL", "GPS"];

/// Settings document file name (stored in the platform config directory).
pub const SETTINGS_FILE_NAME: &str = "settings.json";

// =============================================================================
// Log area limits
// =============================================================================

/// Hard upper bound on the number of log records retained in the log area.
///
/// When the cap is reached the oldest record is dropped before appending,
/// so a long-running merge session cannot grow the history without bound.
/// Far above anything a single Takeout merge produces.
pub const MAX_LOG_HISTORY: usize = 2_000;

/// Time format for rendered log lines (local wall-clock time).
pub const LOG_TIME_FORMAT: &str = "%H:%M:%S";

// =============================================================================
// Event transport
// =============================================================================

/// Name of the inbound backend log event.
pub const EVENT_LOG: &str = "log";

/// Name of the inbound ExifTool availability event.
pub const EVENT_EXIFTOOL_STATUS: &str = "exiftoolStatus";

/// Maximum number of backend events processed by the UI update loop per
/// frame. Remaining events stay queued and are processed on subsequent
/// frames, so a burst cannot stall the render loop.
pub const MAX_EVENTS_PER_FRAME: usize = 500;

// =============================================================================
// External references
// =============================================================================

/// Download page linked from the ExifTool warning overlay.
pub const EXIFTOOL_URL: &str = "https://exiftool.org/";

/// Executable name probed on PATH at startup.
pub const EXIFTOOL_BINARY: &str = "exiftool";

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
