//! Error types for GrantScope.
//!
//! This module defines a unified error enum covering all error categories
//! in the application: configuration, I/O, retrieval, generation, and
//! prompt assembly.

use thiserror::Error;

/// Unified error type for GrantScope.
///
/// All fallible functions return `Result<T, AppError>`.
/// Errors are represented and propagated, never panicked on.
///
/// Note that a policy refusal or a no-context fallback is *not* an error:
/// both are ordinary answer outcomes. `Retrieval` and `Generation` are
/// reserved for genuine backend failures and are never masked as fallback
/// text.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Vector index or embedding backend unreachable/misconfigured
    #[error("Retrieval unavailable: {0}")]
    Retrieval(String),

    /// Language model call failed (timeout, quota, malformed response)
    #[error("Generation failed: {0}")]
    Generation(String),

    /// Prompt assembly errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retrieval_error_display() {
        let err = AppError::Retrieval("index not found".to_string());
        assert_eq!(err.to_string(), "Retrieval unavailable: index not found");
    }

    #[test]
    fn test_generation_error_display() {
        let err = AppError::Generation("timeout".to_string());
        assert_eq!(err.to_string(), "Generation failed: timeout");
    }
}
