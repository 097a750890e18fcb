//! CLI error types and result alias.

use dbprobe_core::DbProbeError;
use miette::Diagnostic;
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// A probe step failed
    #[error(transparent)]
    #[diagnostic(transparent)]
    Probe(#[from] DbProbeError),

    /// The tracing subscriber could not be installed
    #[error("Logging error: {0}")]
    #[diagnostic(code(dbprobe::logging))]
    Logging(String),
}

impl CliError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Probe(err) => err.exit_code(),
            CliError::Logging(_) => 1,
        }
    }
}
