//! Error types for the helpdesk workspace.
//!
//! A single error enum covers configuration, I/O, retrieval, generation,
//! prompt rendering, and serialization failures.

use thiserror::Error;

/// Unified error type for the helpdesk crates.
///
/// All fallible functions return `Result<T, AppError>`.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The retriever could not complete a lookup
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// The generation service could not produce a completion
    #[error("Generation error: {0}")]
    Generation(String),

    /// Prompt template errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Re-classify as a retrieval failure, keeping existing retrieval errors intact.
    pub fn into_retrieval(self) -> Self {
        match self {
            AppError::Retrieval(_) => self,
            other => AppError::Retrieval(other.to_string()),
        }
    }

    /// Re-classify as a generation failure, keeping existing generation errors intact.
    pub fn into_generation(self) -> Self {
        match self {
            AppError::Generation(_) => self,
            other => AppError::Generation(other.to_string()),
        }
    }
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
