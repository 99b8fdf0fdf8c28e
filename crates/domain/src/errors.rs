//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Cache key string does not have the expected shape
    #[error("Invalid cache key: {0}")]
    InvalidCacheKey(String),

    /// Document cannot be used as a cache record payload
    #[error("Invalid cache document: {0}")]
    InvalidDocument(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}
