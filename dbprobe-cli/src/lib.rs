//! dbprobe CLI - Command-line database connectivity checker.
//!
//! Loads `jdbctest.props`, probes the database port, then connects and runs
//! the configured test query, printing progress as it goes.

pub mod cli;
pub mod drivers;
pub mod error;
pub mod logging;
pub mod output;
pub mod run;
