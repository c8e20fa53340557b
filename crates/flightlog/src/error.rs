//! Error types for flightlog.
//!
//! This module defines all error types used throughout the flightlog crate.
//! User-facing errors (validation, missing selection, empty results) are kept
//! apart from I/O and configuration failures so the front end can decide
//! which ones are just messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for flightlog operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Persistence Errors ===
    /// A line of the flights file could not be turned into a record.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecordLine {
        /// 1-based line number in the file.
        line: usize,
        /// Why the line was rejected.
        reason: String,
    },

    /// The flights file could not be read or written.
    #[error("flights file {path} unavailable: {source}")]
    FileUnavailable {
        /// Path to the flights file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === User Errors ===
    /// User input was rejected.
    #[error("{message}")]
    Validation {
        /// Description of the problem.
        message: String,
    },

    /// An operation needing a selected flight was run without one.
    #[error("no flight selected")]
    NoSelection,

    /// A filter produced nothing to show.
    #[error("{message}")]
    NoResults {
        /// Message to show instead of the empty result.
        message: String,
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

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for flightlog operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new no-results error.
    #[must_use]
    pub fn no_results(message: impl Into<String>) -> Self {
        Self::NoResults {
            message: message.into(),
        }
    }

    /// Create a file-unavailable error for the given path.
    #[must_use]
    pub fn file_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileUnavailable {
            path: path.into(),
            source,
        }
    }

    /// Check if this error is something to show the user rather than a fault.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. } | Self::NoSelection | Self::NoResults { .. }
        )
    }

    /// Check if this error means the flights file could not be accessed.
    #[must_use]
    pub fn is_file_unavailable(&self) -> bool {
        matches!(self, Self::FileUnavailable { .. })
    }
}
