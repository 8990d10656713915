//! Error types for Google API access.

use nextday_core::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl ProviderError {
    /// Network failures and non-success HTTP responses.
    ///
    /// Everything else (missing fields, bad credentials files, local I/O)
    /// is not a transport problem.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Status { .. })
    }
}

pub type ProviderResult<T> = Result<T, ProviderError>;
