//! Error types for tradeunion.
//!
//! Duplicate ids and unknown ids are not errors: the roster reports them as
//! `false`/`None`. The variants here cover malformed records, file I/O and
//! configuration problems.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for tradeunion operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Record Errors ===
    /// A member mapping lacks one of the required keys.
    #[error("member record is missing required field '{field}'")]
    MissingField {
        /// Name of the absent key.
        field: &'static str,
    },

    /// A member mapping holds a non-string value for a required key.
    #[error("member record field '{field}' must be a string")]
    InvalidField {
        /// Name of the offending key.
        field: &'static str,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to create the directory holding the backing file.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for tradeunion operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a configuration validation error.
    #[must_use]
    pub fn config_validation(message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            message: message.into(),
        }
    }

    /// Check if this error came from a malformed member record.
    #[must_use]
    pub fn is_record_error(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::InvalidField { .. })
    }
}
