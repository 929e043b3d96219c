//! Error types for the lab's storage and record validation.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for lab operations.
pub type Result<T> = std::result::Result<T, LabError>;

#[derive(Error, Debug)]
pub enum LabError {
    #[error("Failed to read {path}: {source}")]
    StorageRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    StorageWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory creation failed: {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid record: {reason}")]
    InvalidRecord { reason: String },
}

impl LabError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        LabError::InvalidRecord {
            reason: reason.into(),
        }
    }
}
