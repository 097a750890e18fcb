//! Error types for Oracle operations.

use thiserror::Error;

/// Result type for Oracle operations.
pub type OracleResult<T> = Result<T, OracleError>;

/// Errors that can occur during Oracle operations.
#[derive(Error, Debug)]
pub enum OracleError {
    /// Error reported by the Oracle client library or server.
    #[error("oracle error: {0}")]
    Oracle(#[from] oracle::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// The blocking driver task failed.
    #[error("internal error: {0}")]
    Internal(String),
}

impl OracleError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<tokio::task::JoinError> for OracleError {
    fn from(err: tokio::task::JoinError) -> Self {
        OracleError::internal(format!("driver task failed: {}", err))
    }
}
