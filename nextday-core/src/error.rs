//! Error types for nextday-core.

use thiserror::Error;

/// Errors that can occur while computing windows or writing snapshots.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown time zone: {0}")]
    UnknownTimeZone(String),

    #[error("Local time {0} does not exist in the local time zone")]
    InvalidLocalTime(String),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for nextday-core operations.
pub type CoreResult<T> = Result<T, CoreError>;
