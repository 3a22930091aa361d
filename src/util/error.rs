// metamerge - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// No string-based error propagation; every error keeps its causal chain
// for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all metamerge operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum MetamergeError {
    /// Settings service call failed.
    Service(ServiceError),

    /// Configuration loading or validation failed.
    Config(ConfigError),
}

impl fmt::Display for MetamergeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(e) => write!(f, "Settings service error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
        }
    }
}

impl std::error::Error for MetamergeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Service(e) => Some(e),
            Self::Config(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Settings service errors
// ---------------------------------------------------------------------------

/// Errors produced by the settings service boundary (fetch and update).
///
/// All variants are non-fatal: the UI stays interactive, the failure is
/// logged, and no retry happens until the user acts again.
#[derive(Debug)]
pub enum ServiceError {
    /// The transport to the service failed (unreachable, timed out, ...).
    Transport {
        operation: &'static str,
        message: String,
    },

    /// The fetched document could not be decoded.
    Decode {
        operation: &'static str,
        source: serde_json::Error,
    },

    /// The document could not be encoded for the update call.
    Encode {
        operation: &'static str,
        source: serde_json::Error,
    },

    /// I/O error against the durable settings store.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport { operation, message } => {
                write!(f, "transport failure during {operation}: {message}")
            }
            Self::Decode { operation, source } => {
                write!(f, "cannot decode settings during {operation}: {source}")
            }
            Self::Encode { operation, source } => {
                write!(f, "cannot encode settings during {operation}: {source}")
            }
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source, .. } => Some(source),
            Self::Encode { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            Self::Transport { .. } => None,
        }
    }
}

impl From<ServiceError> for MetamergeError {
    fn from(e: ServiceError) -> Self {
        Self::Service(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for MetamergeError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for metamerge results.
pub type Result<T> = std::result::Result<T, MetamergeError>;
