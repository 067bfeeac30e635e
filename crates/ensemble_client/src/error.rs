//! Classification transport errors

use thiserror::Error;

/// Errors that can occur while talking to the classification ensemble
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Failed to connect to the ensemble service
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the ensemble service failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout waiting for a classification
    #[error("Classification timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server-side error
    #[error("Server error: {0}")]
    ServerError(String),
}

impl From<reqwest::Error> for ClassifierError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(30000)
        } else if err.is_connect() {
            Self::ConnectionFailed(err.to_string())
        } else {
            Self::RequestFailed(err.to_string())
        }
    }
}
