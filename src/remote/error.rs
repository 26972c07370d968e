//! Failure taxonomy for the remote boundary.

use thiserror::Error;

/// Failures at the remote boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Transport-level failure; no usable response was received.
    #[error("network error: {0}")]
    Network(String),

    /// The service responded but reported failure, or the envelope was
    /// malformed. Carries the normalized human-readable message.
    #[error("service error: {0}")]
    Service(String),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Service(format!("invalid response envelope: {err}"))
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
