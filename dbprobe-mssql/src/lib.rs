//! # dbprobe-mssql
//!
//! Microsoft SQL Server driver for dbprobe.
//!
//! This crate provides:
//! - Parsing of `jdbc:sqlserver://` URLs into a connection configuration
//! - A single `tiberius` connection with connect timeout and Azure routing
//! - Conversion of result rows to text
//! - A [`MssqlDriver`] to register with a `DriverRegistry`
//!
//! ## Example
//!
//! ```rust,ignore
//! use dbprobe_core::DriverRegistry;
//! use dbprobe_mssql::MssqlDriver;
//!
//! let registry = DriverRegistry::new().with(MssqlDriver::new());
//! ```

pub mod config;
pub mod connection;
pub mod driver;
pub mod error;
pub mod row;

pub use config::{EncryptionMode, MssqlConfig};
pub use connection::MssqlConnection;
pub use driver::MssqlDriver;
pub use error::{MssqlError, MssqlResult};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::MssqlConfig;
    pub use crate::connection::MssqlConnection;
    pub use crate::driver::MssqlDriver;
    pub use crate::error::{MssqlError, MssqlResult};
}
