//! # dbprobe
//!
//! Checks that a database configured through a JDBC-style properties file is
//! reachable, that its credentials are accepted, and that a test query runs.
//!
//! dbprobe provides:
//! - Host and port extraction from Oracle and SQL Server JDBC URLs
//! - `.properties` configuration loading and validation
//! - A TCP reachability probe with a bounded wait
//! - SQL Server (`mssql`, default) and Oracle (`oracle`) drivers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dbprobe::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), dbprobe::DbProbeError> {
//!     let config = ConnectionConfig::load(Path::new(CONFIG_FILE_NAME))?;
//!     Prober::default().check(config.host(), config.port()).await.map_err(|source| {
//!         DbProbeError::Probe { host: config.host().into(), port: config.port(), source }
//!     })?;
//!
//!     let registry = DriverRegistry::new().with(MssqlDriver::new());
//!     QueryRunner::new(&registry)
//!         .run(&config, |event| {
//!             if let RunEvent::Row(row) = event {
//!                 println!("{}", format_row(row));
//!             }
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// Endpoint extraction, configuration, probing and query running.
pub mod core {
    pub use dbprobe_core::*;
}

/// Microsoft SQL Server driver.
#[cfg(feature = "mssql")]
#[cfg_attr(docsrs, doc(cfg(feature = "mssql")))]
pub mod mssql {
    pub use dbprobe_mssql::*;
}

/// Oracle driver.
#[cfg(feature = "oracle")]
#[cfg_attr(docsrs, doc(cfg(feature = "oracle")))]
pub mod oracle {
    pub use dbprobe_oracle::*;
}

/// Prelude module for convenient imports.
pub mod prelude {
    pub use dbprobe_core::prelude::*;
    pub use dbprobe_core::{CONFIG_FILE_NAME, format_row};

    #[cfg(feature = "mssql")]
    pub use dbprobe_mssql::MssqlDriver;
    #[cfg(feature = "oracle")]
    pub use dbprobe_oracle::OracleDriver;
}

// Re-export key types at the crate root
pub use dbprobe_core::{
    ConnectionConfig, DbProbeError, DbProbeResult, DriverFamily, Endpoint, ErrorKind,
    extract_endpoint,
};
