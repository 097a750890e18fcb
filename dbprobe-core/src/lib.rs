//! # dbprobe-core
//!
//! Building blocks for checking that a database is reachable and that a
//! credential/query combination works:
//!
//! - [`endpoint`]: host and port extraction from Oracle and SQL Server JDBC URLs
//! - [`properties`]: `.properties` file parsing
//! - [`config`]: validated [`ConnectionConfig`] built from those properties
//! - [`probe`]: TCP connect-with-timeout reachability check
//! - [`driver`]: the [`Driver`]/[`Connection`] contract vendor crates implement
//! - [`runner`]: connect, execute the query, and report rows
//!
//! ## Example
//!
//! ```rust,ignore
//! use dbprobe_core::prelude::*;
//!
//! let config = ConnectionConfig::load(Path::new(CONFIG_FILE_NAME))?;
//! if !Prober::default().probe(config.host(), config.port()).await {
//!     return Err(...);
//! }
//! let registry = DriverRegistry::new().with(MssqlDriver::new());
//! QueryRunner::new(&registry)
//!     .run(&config, |event| println!("{event:?}"))
//!     .await?;
//! ```

pub mod config;
pub mod driver;
pub mod endpoint;
pub mod error;
pub mod probe;
pub mod properties;
pub mod runner;

pub use config::{ConfigError, ConnectionConfig, CONFIG_FILE_NAME};
pub use driver::{BoxError, Connection, Driver, DriverRegistry, ResultSet};
pub use endpoint::{extract_endpoint, synthesize_oracle_url, DriverFamily, Endpoint, EndpointError};
pub use error::{DbProbeError, DbProbeResult, ErrorKind};
pub use probe::{ProbeFailure, Prober, DEFAULT_PROBE_TIMEOUT};
pub use properties::{Properties, PropertiesError};
pub use runner::{format_row, strip_statement_terminator, QueryRunner, RunEvent};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::{ConnectionConfig, CONFIG_FILE_NAME};
    pub use crate::driver::{Connection, Driver, DriverRegistry, ResultSet};
    pub use crate::endpoint::{extract_endpoint, DriverFamily, Endpoint};
    pub use crate::error::{DbProbeError, DbProbeResult, ErrorKind};
    pub use crate::probe::Prober;
    pub use crate::runner::{QueryRunner, RunEvent};
}
