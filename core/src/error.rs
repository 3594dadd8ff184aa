//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Remote data source unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Local data source unavailable: {0}")]
    LocalUnavailable(String),

    #[error("Illegal state: {0}")]
    IllegalState(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Whether this error is a lookup miss rather than a failure of a source
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether a data source (remote or local) failed to serve the request
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::RemoteUnavailable(_) | Self::LocalUnavailable(_))
    }
}
