//! Error types for Drilldown.
//!
//! Configuration problems surface as [`DrilldownError`] via `thiserror`.
//! Errors raised by a caller-supplied key function are never wrapped here:
//! `generate` hands them back to the caller exactly as the key function
//! produced them.

use std::path::PathBuf;

/// Top-level error type for Drilldown configuration.
#[derive(Debug, thiserror::Error)]
pub enum DrilldownError {
    /// Configuration parsing or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error while reading a config file.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DrilldownError>;

impl DrilldownError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error came from configuration validation.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = DrilldownError::config("size_thresholds must not be empty");
        assert_eq!(
            err.to_string(),
            "config error: size_thresholds must not be empty"
        );
        assert!(err.is_config());

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = DrilldownError::io("/tmp/drilldown.toml", io);
        assert!(err.to_string().contains("drilldown.toml"));
        assert!(!err.is_config());
    }
}
