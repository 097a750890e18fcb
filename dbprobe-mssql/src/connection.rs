//! Microsoft SQL Server connection wrapper.

use dbprobe_core::driver::ResultSet;
use tiberius::{Client, SqlBrowser};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::{debug, info};

use crate::config::MssqlConfig;
use crate::error::{MssqlError, MssqlResult};
use crate::row::row_values;

type TiberiusClient = Client<Compat<TcpStream>>;

/// A single SQL Server connection.
pub struct MssqlConnection {
    client: TiberiusClient,
}

impl MssqlConnection {
    /// Connect and log in, bounded by the configured connect timeout.
    pub async fn connect(config: &MssqlConfig) -> MssqlResult<Self> {
        let tiberius_config = config.to_tiberius_config()?;
        let timeout = config.connect_timeout;

        let client = tokio::time::timeout(timeout, open(tiberius_config, config.uses_sql_browser()))
            .await
            .map_err(|_| MssqlError::Timeout(timeout.as_millis() as u64))??;

        info!(
            host = %config.host,
            port = %config.port,
            database = ?config.database,
            instance = ?config.instance_name,
            "MSSQL connection established"
        );

        Ok(Self { client })
    }

    /// Execute a query and collect the first result set as text.
    pub async fn query(&mut self, sql: &str) -> MssqlResult<ResultSet> {
        debug!(sql = %sql, "Executing query");

        let mut stream = self.client.simple_query(sql).await?;
        let columns: Vec<String> = stream
            .columns()
            .await?
            .map(|cols| cols.iter().map(|c| c.name().to_string()).collect())
            .unwrap_or_default();
        let rows = stream.into_first_result().await?;

        let mut result = ResultSet::new(columns);
        for row in &rows {
            result.push_row(row_values(row));
        }
        Ok(result)
    }

    /// Close the connection.
    pub async fn close(self) -> MssqlResult<()> {
        debug!("Closing connection");
        self.client.close().await?;
        Ok(())
    }
}

async fn open(config: tiberius::Config, sql_browser: bool) -> MssqlResult<TiberiusClient> {
    let tcp = if sql_browser {
        browse_connect(&config).await?
    } else {
        tcp_connect(&config.get_addr()).await?
    };

    match Client::connect(config.clone(), tcp.compat_write()).await {
        Ok(client) => Ok(client),
        // Azure SQL may redirect the login to another gateway node.
        Err(tiberius::error::Error::Routing { host, port }) => {
            debug!(host = %host, port = port, "Login routed to another server");
            let mut routed = config;
            routed.host(&host);
            routed.port(port);

            let tcp = tcp_connect(&routed.get_addr()).await?;
            Ok(Client::connect(routed, tcp.compat_write()).await?)
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolve the named instance's port through the SQL Server Browser, then connect.
async fn browse_connect(config: &tiberius::Config) -> MssqlResult<TcpStream> {
    debug!(addr = %config.get_addr(), "Resolving named instance through SQL Server Browser");
    let tcp = TcpStream::connect_named(config).await.map_err(|e| {
        MssqlError::connection(format!(
            "failed to locate named instance at {}: {}",
            config.get_addr(),
            e
        ))
    })?;
    tcp.set_nodelay(true).ok();
    Ok(tcp)
}

async fn tcp_connect(addr: &str) -> MssqlResult<TcpStream> {
    let tcp = TcpStream::connect(addr)
        .await
        .map_err(|e| MssqlError::connection(format!("failed to connect to {}: {}", addr, e)))?;
    tcp.set_nodelay(true).ok();
    Ok(tcp)
}
