//! Error types for Microsoft SQL Server operations.

use thiserror::Error;

/// Result type for MSSQL operations.
pub type MssqlResult<T> = Result<T, MssqlError>;

/// Errors that can occur during MSSQL operations.
#[derive(Error, Debug)]
pub enum MssqlError {
    /// Tiberius/SQL Server error.
    #[error("sql server error: {0}")]
    SqlServer(#[from] tiberius::error::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Connection error.
    #[error("connection error: {0}")]
    Connection(String),

    /// Timeout error.
    #[error("operation timed out after {0}ms")]
    Timeout(u64),
}

impl MssqlError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Check if this is a connection error.
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Self::Connection(_) | Self::Timeout(_))
    }

    /// Check if this is a timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = MssqlError::config("invalid connection string");
        assert!(matches!(err, MssqlError::Config(_)));

        let err = MssqlError::connection("connection refused");
        assert!(err.is_connection_error());

        let err = MssqlError::Timeout(5000);
        assert!(err.is_timeout());
        assert!(err.is_connection_error());
    }

    #[test]
    fn test_error_display() {
        let err = MssqlError::config("test error");
        assert_eq!(err.to_string(), "configuration error: test error");

        let err = MssqlError::Timeout(30000);
        assert_eq!(err.to_string(), "operation timed out after 30000ms");
    }
}
