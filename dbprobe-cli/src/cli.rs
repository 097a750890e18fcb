//! CLI argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use dbprobe_core::CONFIG_FILE_NAME;

/// Check that a database is reachable and that a test query succeeds
#[derive(Parser, Debug)]
#[command(name = "dbprobe")]
#[command(version)]
#[command(
    about = "dbprobe - Check database reachability, credentials and a test query",
    long_about = None
)]
pub struct Cli {
    /// Path to the properties file
    #[arg(short, long, env = "DBPROBE_CONFIG", default_value = CONFIG_FILE_NAME)]
    pub config: PathBuf,

    /// TCP reachability probe timeout in milliseconds
    #[arg(
        short,
        long,
        env = "DBPROBE_TIMEOUT_MS",
        default_value_t = 2000,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_ms: u64,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}
