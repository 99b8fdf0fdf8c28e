//! Inference errors

use thiserror::Error;

/// Errors that can occur during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    /// Failed to connect to the inference API
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request to the inference API failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// No API key configured for the inference API
    #[error("No API key configured for the inference API")]
    MissingApiKey,

    /// Response parsing failed
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Timeout during inference
    #[error("Inference timeout after {0}ms")]
    Timeout(u64),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),
}

impl From<reqwest::Error> for InferenceError {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_message() {
        let err = InferenceError::MissingApiKey;
        assert!(err.to_string().contains("No API key"));
    }

    #[test]
    fn timeout_message_includes_duration() {
        let err = InferenceError::Timeout(30000);
        assert!(err.to_string().contains("30000ms"));
    }
}
