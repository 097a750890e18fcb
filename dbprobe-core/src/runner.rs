//! Driver-level connect and query execution.

use tracing::{debug, warn};

use crate::config::ConnectionConfig;
use crate::driver::{Connection, DriverRegistry, ResultSet};
use crate::error::{DbProbeError, DbProbeResult};

/// Statement terminator stripped from the end of the query.
pub const STATEMENT_TERMINATOR: char = ';';

/// Progress reported while a query runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent<'a> {
    /// The driver for the configured identifier was found.
    DriverLoaded { driver: &'a str },
    /// A connection is about to be opened.
    Connecting { url: &'a str },
    /// One result row as `(column, value)` pairs in column order.
    Row(&'a [(&'a str, &'a str)]),
}

/// Remove exactly one trailing `;`.
pub fn strip_statement_terminator(query: &str) -> &str {
    query.strip_suffix(STATEMENT_TERMINATOR).unwrap_or(query)
}

/// Render a row as concatenated `column:value` pairs.
pub fn format_row(row: &[(&str, &str)]) -> String {
    row.iter()
        .map(|(name, value)| format!("{}:{}", name, value))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Loads the configured driver, connects, and runs the configured query.
#[derive(Debug)]
pub struct QueryRunner<'r> {
    registry: &'r DriverRegistry,
}

impl<'r> QueryRunner<'r> {
    /// Create a runner over the drivers in `registry`.
    pub fn new(registry: &'r DriverRegistry) -> Self {
        Self { registry }
    }

    /// Run the configured query, reporting progress through `on_event`.
    ///
    /// The connection is closed on every path after a successful connect.
    /// A failing close is logged and does not change the result.
    pub async fn run<F>(&self, config: &ConnectionConfig, mut on_event: F) -> DbProbeResult<ResultSet>
    where
        F: FnMut(RunEvent<'_>),
    {
        let driver = self.registry.load(config.driver_id())?;
        on_event(RunEvent::DriverLoaded {
            driver: config.driver_id(),
        });

        on_event(RunEvent::Connecting { url: config.url() });
        let mut connection = driver
            .connect(config.url(), config.username(), config.password())
            .await
            .map_err(|source| DbProbeError::Connect {
                url: config.url().to_string(),
                username: config.username().to_string(),
                source,
            })?;
        debug!(driver = driver.name(), "Connection established");

        let sql = strip_statement_terminator(config.query());
        let result = connection.query(sql).await;
        close(connection).await;

        let result_set = result.map_err(|source| DbProbeError::Query {
            query: config.query().to_string(),
            source,
        })?;
        debug!(rows = result_set.len(), "Query completed");

        for row in result_set.rows() {
            on_event(RunEvent::Row(&row));
        }

        Ok(result_set)
    }
}

async fn close(connection: Box<dyn Connection>) {
    if let Err(e) = connection.close().await {
        warn!(error = %e, "Error closing connection");
    }
}
