//! Error types for Revue

use thiserror::Error;

/// Result type alias for Revue operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Revue operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid endpoint or request URL
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Transport-level failure on the event stream
    ///
    /// Carried as a string: terminal errors are forwarded through the
    /// session's message channel and the transport error type is not `Clone`.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}
