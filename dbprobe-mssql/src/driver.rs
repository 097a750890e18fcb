//! [`Driver`] implementation for SQL Server.

use async_trait::async_trait;
use dbprobe_core::driver::{BoxError, Connection, Driver, ResultSet};
use dbprobe_core::endpoint::DriverFamily;

use crate::config::MssqlConfig;
use crate::connection::MssqlConnection;

/// SQL Server driver backed by tiberius.
#[derive(Debug, Clone, Copy, Default)]
pub struct MssqlDriver;

impl MssqlDriver {
    /// Create the driver.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Driver for MssqlDriver {
    fn name(&self) -> &'static str {
        "mssql"
    }

    fn family(&self) -> DriverFamily {
        DriverFamily::SqlServer
    }

    async fn connect(
        &self,
        url: &str,
        username: &str,
        password: &str,
    ) -> Result<Box<dyn Connection>, BoxError> {
        let config = MssqlConfig::from_jdbc_url(url)?.with_credentials(username, password);
        let connection = MssqlConnection::connect(&config).await?;
        Ok(Box::new(connection))
    }
}

#[async_trait]
impl Connection for MssqlConnection {
    async fn query(&mut self, sql: &str) -> Result<ResultSet, BoxError> {
        Ok(MssqlConnection::query(self, sql).await?)
    }

    async fn close(self: Box<Self>) -> Result<(), BoxError> {
        Ok(MssqlConnection::close(*self).await?)
    }
}
