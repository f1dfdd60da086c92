//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Language tag does not map to a supported language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Bill category is neither electricity nor water
    #[error("Unknown bill category: {0}")]
    UnknownBillCategory(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}
