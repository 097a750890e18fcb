//! # dbprobe-oracle
//!
//! Oracle driver for dbprobe, built on the `oracle` crate. The Oracle client
//! libraries (Instant Client or a full client) must be installed where the
//! binary runs; they are loaded when the first connection is opened.
//!
//! ```rust,ignore
//! use dbprobe_core::DriverRegistry;
//! use dbprobe_oracle::OracleDriver;
//!
//! let registry = DriverRegistry::new().with(OracleDriver::new());
//! ```

pub mod config;
pub mod connection;
pub mod driver;
pub mod error;

pub use config::connect_string_from_jdbc;
pub use connection::OracleConnection;
pub use driver::OracleDriver;
pub use error::{OracleError, OracleResult};
