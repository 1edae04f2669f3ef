//! Verse source error types
//!
//! Every variant is a transport-level failure from the point of view of the
//! search controller: it is logged and the result set is reset to empty.
//! None of them are fatal.

use thiserror::Error;

/// Errors that can occur while fetching verses
#[derive(Debug, Error)]
pub enum SourceError {
    /// Network or protocol failure
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// No response within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// Service answered with a non-success status
    #[error("Service returned HTTP {0}")]
    Status(u16),

    /// Response body was not the expected JSON
    #[error("Malformed response: {0}")]
    Decode(String),

    /// Endpoint or translation could not form a valid URL
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The request could not be started
    #[error("Search worker unavailable: {0}")]
    Unavailable(String),
}

impl SourceError {
    /// Classify a reqwest error into the matching variant
    #[must_use]
    pub fn from_reqwest(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else if error.is_decode() {
            Self::Decode(error.to_string())
        } else if let Some(status) = error.status() {
            Self::Status(status.as_u16())
        } else {
            Self::Transport(error)
        }
    }
}

/// Result type for verse source operations
pub type Result<T> = std::result::Result<T, SourceError>;
