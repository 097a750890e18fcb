//! Error taxonomy for a probe run.
//!
//! Every error is terminal: the binary reports it and exits with status 1.
//! [`ErrorKind`] names the failure class for programmatic handling.

use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::driver::BoxError;
use crate::endpoint::EndpointError;
use crate::probe::ProbeFailure;

/// Result type for probe runs.
pub type DbProbeResult<T> = Result<T, DbProbeError>;

/// Failure classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The configuration file is absent, unreadable or unparsable.
    ConfigFile,
    /// A required property is missing or blank.
    MissingConfig,
    /// Neither a URL nor a SID was configured.
    IncompleteConfig,
    /// The port is not a valid port number.
    InvalidPort,
    /// The driver identifier names no supported vendor.
    UnsupportedDriver,
    /// The connection URL lacks fields its dialect requires.
    MalformedUrl,
    /// The TCP reachability check failed.
    ProbeFailure,
    /// No usable driver for the identifier.
    DriverLoad,
    /// The driver could not open a connection.
    Connect,
    /// The query failed.
    Query,
}

/// Errors that end a probe run.
#[derive(Error, Debug, Diagnostic)]
pub enum DbProbeError {
    /// Configuration loading or validation failed.
    #[error(transparent)]
    #[diagnostic(code(dbprobe::config))]
    Config(#[from] ConfigError),

    /// The endpoint did not accept a TCP connection.
    #[error("unable to connect to port {port} at {host}")]
    #[diagnostic(
        code(dbprobe::probe),
        help("check that the host is reachable from this machine and that the database listener is running on that port")
    )]
    Probe {
        host: String,
        port: u16,
        #[source]
        source: ProbeFailure,
    },

    /// The driver identifier could not be resolved to a driver.
    #[error("unable to load driver class {driver}: {reason}")]
    #[diagnostic(
        code(dbprobe::driver_load),
        help("check driver.class and that the driver for this database family is compiled in (cargo features `mssql`, `oracle`)")
    )]
    DriverLoad { driver: String, reason: String },

    /// The driver failed to connect.
    #[error("unable to connect to {url} (username: {username})")]
    #[diagnostic(code(dbprobe::connect))]
    Connect {
        url: String,
        username: String,
        #[source]
        source: BoxError,
    },

    /// The query failed.
    #[error("error while executing query {query}")]
    #[diagnostic(code(dbprobe::query))]
    Query {
        query: String,
        #[source]
        source: BoxError,
    },
}

impl DbProbeError {
    /// The failure class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(err) => match err {
                ConfigError::FileNotFound { .. }
                | ConfigError::Unreadable { .. }
                | ConfigError::Parse { .. } => ErrorKind::ConfigFile,
                ConfigError::Missing { .. } => ErrorKind::MissingConfig,
                ConfigError::Incomplete => ErrorKind::IncompleteConfig,
                ConfigError::InvalidPort { .. } => ErrorKind::InvalidPort,
                ConfigError::Endpoint(EndpointError::UnsupportedDriver(_)) => {
                    ErrorKind::UnsupportedDriver
                }
                ConfigError::Endpoint(EndpointError::MalformedUrl { .. }) => {
                    ErrorKind::MalformedUrl
                }
            },
            Self::Probe { .. } => ErrorKind::ProbeFailure,
            Self::DriverLoad { .. } => ErrorKind::DriverLoad,
            Self::Connect { .. } => ErrorKind::Connect,
            Self::Query { .. } => ErrorKind::Query,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> i32 {
        1
    }
}
