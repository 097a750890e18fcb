//! Oracle connection wrapper.
//!
//! The Oracle client is synchronous; every call runs on the blocking pool.

use std::sync::Arc;

use dbprobe_core::driver::ResultSet;
use tracing::{debug, info};

use crate::config::connect_string_from_jdbc;
use crate::error::OracleResult;

/// A single Oracle connection.
pub struct OracleConnection {
    conn: Arc<oracle::Connection>,
}

impl OracleConnection {
    /// Connect using a JDBC URL and credentials.
    pub async fn connect(url: &str, username: &str, password: &str) -> OracleResult<Self> {
        let connect_string = connect_string_from_jdbc(url)?;
        debug!(connect_string = %connect_string, "Connecting to Oracle");

        let username = username.to_string();
        let password = password.to_string();
        let conn = tokio::task::spawn_blocking(move || {
            oracle::Connection::connect(username, password, connect_string)
        })
        .await??;

        info!("Oracle connection established");
        Ok(Self {
            conn: Arc::new(conn),
        })
    }

    /// Execute a query and collect all rows as text.
    pub async fn query(&mut self, sql: &str) -> OracleResult<ResultSet> {
        debug!(sql = %sql, "Executing query");

        let conn = Arc::clone(&self.conn);
        let sql = sql.to_string();
        tokio::task::spawn_blocking(move || -> OracleResult<ResultSet> {
            let rows = conn.query(&sql, &[])?;
            let columns: Vec<String> = rows
                .column_info()
                .iter()
                .map(|info| info.name().to_string())
                .collect();
            let width = columns.len();

            let mut result = ResultSet::new(columns);
            for row in rows {
                let row = row?;
                let values = (0..width)
                    .map(|idx| row.get::<usize, Option<String>>(idx))
                    .collect::<Result<Vec<_>, _>>()?;
                result.push_row(values);
            }
            Ok(result)
        })
        .await?
    }

    /// Close the connection.
    pub async fn close(self) -> OracleResult<()> {
        debug!("Closing connection");
        let conn = self.conn;
        tokio::task::spawn_blocking(move || conn.close()).await??;
        Ok(())
    }
}
