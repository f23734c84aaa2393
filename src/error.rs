//! Error handling for saved-places conversion.
//!
//! Only structural failures live here: an unreadable or malformed input
//! document, or an output that could not be written. Records that cannot be
//! located are not errors; they are counted in
//! [`ExtractionStats`](crate::models::ExtractionStats) and skipped.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LauncherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Malformed input in {path}: {reason}")]
    MalformedInput { path: PathBuf, reason: String },

    #[error("Unexpected document shape in {path}: {reason}")]
    InvalidShape { path: PathBuf, reason: String },

    #[error("Failed to write output to {path}: {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl LauncherError {
    /// Create a malformed-input error for a document that is not valid JSON
    pub fn malformed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a shape error for valid JSON that is not a feature collection
    pub fn invalid_shape(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LauncherError>;
