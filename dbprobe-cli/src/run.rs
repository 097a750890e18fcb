//! The probe sequence: load, probe, connect, query.

use std::time::Duration;

use dbprobe_core::{
    ConnectionConfig, DbProbeError, DriverRegistry, Prober, QueryRunner, RunEvent, format_row,
};
use tracing::debug;

use crate::cli::Cli;
use crate::error::CliResult;
use crate::output;

/// Run every step in order, stopping at the first failure.
pub async fn run(cli: &Cli, registry: &DriverRegistry) -> CliResult<()> {
    let config = ConnectionConfig::load(&cli.config).map_err(DbProbeError::from)?;
    output::success(&format!(
        "Properties file {} successfully loaded",
        cli.config.display()
    ));
    if config.url_synthesized() {
        output::info("db.url not provided, generating one for Oracle.");
    }
    debug!(config = ?config, "Configuration loaded");

    let prober = Prober::new(Duration::from_millis(cli.timeout_ms));
    prober
        .check(config.host(), config.port())
        .await
        .map_err(|source| DbProbeError::Probe {
            host: config.host().to_string(),
            port: config.port(),
            source,
        })?;
    output::success(&format!(
        "Connection test to {}:{} successful.",
        config.host(),
        config.port()
    ));

    QueryRunner::new(registry)
        .run(&config, |event| match event {
            RunEvent::DriverLoaded { driver } => {
                output::success(&format!("Driver {} successfully loaded.", driver))
            }
            RunEvent::Connecting { url } => output::info(&format!(
                "Using the following url to connect to the database: {}",
                url
            )),
            RunEvent::Row(row) => output::row(&format_row(row)),
        })
        .await?;

    output::success("Success running query.");
    Ok(())
}
