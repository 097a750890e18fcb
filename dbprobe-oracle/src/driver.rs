//! [`Driver`] implementation for Oracle.

use async_trait::async_trait;
use dbprobe_core::driver::{BoxError, Connection, Driver, ResultSet};
use dbprobe_core::endpoint::DriverFamily;

use crate::connection::OracleConnection;

/// Oracle driver backed by the Oracle client libraries.
#[derive(Debug, Clone, Copy, Default)]
pub struct OracleDriver;

impl OracleDriver {
    /// Create the driver.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Driver for OracleDriver {
    fn name(&self) -> &'static str {
        "oracle"
    }

    fn family(&self) -> DriverFamily {
        DriverFamily::Oracle
    }

    async fn connect(
        &self,
        url: &str,
        username: &str,
        password: &str,
    ) -> Result<Box<dyn Connection>, BoxError> {
        let connection = OracleConnection::connect(url, username, password).await?;
        Ok(Box::new(connection))
    }
}

#[async_trait]
impl Connection for OracleConnection {
    async fn query(&mut self, sql: &str) -> Result<ResultSet, BoxError> {
        Ok(OracleConnection::query(self, sql).await?)
    }

    async fn close(self: Box<Self>) -> Result<(), BoxError> {
        Ok(OracleConnection::close(*self).await?)
    }
}
