//! Logging setup for the dbprobe binary.
//!
//! # Environment Variables
//!
//! - `DBPROBE_LOG_LEVEL=trace|debug|info|warn|error` - Set the log level (default: warn)
//! - `DBPROBE_LOG_FORMAT=json|pretty|compact` - Set output format (default: compact)
//!
//! `--verbose` forces the `debug` level. Log output always goes to stderr so
//! it never interleaves with the row output on stdout.

use std::env;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::{CliError, CliResult};

/// Crates whose events are shown.
const TARGETS: &[&str] = &[
    "dbprobe",
    "dbprobe_cli",
    "dbprobe_core",
    "dbprobe_mssql",
    "dbprobe_oracle",
];

/// Output formats for log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
    Compact,
}

/// Resolve the log level from the verbose flag and a `DBPROBE_LOG_LEVEL` value.
pub fn resolve_level(verbose: bool, configured: Option<&str>) -> &'static str {
    if verbose {
        return "debug";
    }
    match configured.map(|l| l.trim().to_lowercase()).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("error") => "error",
        _ => "warn",
    }
}

/// Resolve the output format from a `DBPROBE_LOG_FORMAT` value.
pub fn resolve_format(configured: Option<&str>) -> LogFormat {
    match configured.map(|f| f.trim().to_lowercase()).as_deref() {
        Some("json") => LogFormat::Json,
        Some("pretty") => LogFormat::Pretty,
        _ => LogFormat::Compact,
    }
}

fn filter_directives(level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install the global subscriber. Call once at startup.
pub fn init(verbose: bool) -> CliResult<()> {
    let level = resolve_level(verbose, env::var("DBPROBE_LOG_LEVEL").ok().as_deref());
    let format = resolve_format(env::var("DBPROBE_LOG_FORMAT").ok().as_deref());

    let filter = EnvFilter::try_new(filter_directives(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let result = match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init(),
    };
    result.map_err(|e| CliError::Logging(e.to_string()))?;

    tracing::debug!(level = level, format = ?format, "Logging initialized");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_default() {
        assert_eq!(resolve_level(false, None), "warn");
        assert_eq!(resolve_level(false, Some("bogus")), "warn");
    }

    #[test]
    fn test_level_configured() {
        assert_eq!(resolve_level(false, Some("INFO")), "info");
        assert_eq!(resolve_level(false, Some(" trace ")), "trace");
    }

    #[test]
    fn test_verbose_wins() {
        assert_eq!(resolve_level(true, Some("error")), "debug");
    }

    #[test]
    fn test_format() {
        assert_eq!(resolve_format(None), LogFormat::Compact);
        assert_eq!(resolve_format(Some("json")), LogFormat::Json);
        assert_eq!(resolve_format(Some("Pretty")), LogFormat::Pretty);
        assert_eq!(resolve_format(Some("xml")), LogFormat::Compact);
    }

    #[test]
    fn test_filter_directives() {
        let directives = filter_directives("debug");
        assert!(directives.starts_with("dbprobe=debug,dbprobe_cli=debug"));
        assert!(EnvFilter::try_new(directives).is_ok());
    }
}
