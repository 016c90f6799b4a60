//! Error types for settings loading.
//!
//! The simulation itself has no error states; only reading configuration can fail.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating [`Settings`](crate::Settings).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// Settings JSON was malformed.
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// Settings parsed but are out of range.
    #[error("invalid settings: {0}")]
    Invalid(String),
}

impl ConfigError {
    /// Creates an invalid settings error.
    #[must_use]
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }
}
