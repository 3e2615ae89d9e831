//! Error types for gsort-classifier
//!
//! Classification itself is infallible; these errors cover the outer surface
//! only (reading batch files, decoding JSON, loading configuration).

use std::path::PathBuf;
use thiserror::Error;

/// Result alias for fallible classifier operations
pub type Result<T> = std::result::Result<T, ClassifierError>;

#[derive(Debug, Error)]
pub enum ClassifierError {
    /// gsort-common error
    #[error("Common error: {0}")]
    Common(#[from] gsort_common::Error),

    /// Batch or result file could not be read or written
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Batch or result file is not valid JSON of the expected shape
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration loaded but failed validation
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ClassifierError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ClassifierError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        ClassifierError::Json {
            path: path.into(),
            source,
        }
    }
}
