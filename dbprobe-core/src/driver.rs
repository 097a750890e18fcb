//! Database driver abstraction.
//!
//! Vendor crates implement [`Driver`] and [`Connection`]; the binary registers
//! the drivers it was built with in a [`DriverRegistry`], and the configured
//! driver identifier selects one at run time.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::endpoint::DriverFamily;
use crate::error::{DbProbeError, DbProbeResult};

/// Boxed error type returned by driver implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Text used for SQL NULL values.
pub const NULL_TEXT: &str = "null";

/// A database driver for one vendor family.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Human-readable driver name.
    fn name(&self) -> &'static str;

    /// The vendor family this driver serves.
    fn family(&self) -> DriverFamily;

    /// Open a connection using a JDBC-style URL and credentials.
    async fn connect(
        &self,
        url: &str,
        username: &str,
        password: &str,
    ) -> Result<Box<dyn Connection>, BoxError>;
}

/// An open database connection.
#[async_trait]
pub trait Connection: Send {
    /// Execute a query and collect its rows.
    async fn query(&mut self, sql: &str) -> Result<ResultSet, BoxError>;

    /// Close the connection.
    async fn close(self: Box<Self>) -> Result<(), BoxError>;
}

/// Rows returned by a query, with column names in result-metadata order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl ResultSet {
    /// Create a result set with the given column names.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row of stringified values. `None` is SQL NULL.
    ///
    /// Missing trailing values are treated as NULL; extra values are ignored.
    pub fn push_row(&mut self, mut values: Vec<Option<String>>) {
        values.resize(self.columns.len(), None);
        self.rows.push(values);
    }

    /// Column names.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the query returned no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over rows as `(column, value)` pairs.
    pub fn rows(&self) -> impl Iterator<Item = Vec<(&str, &str)>> {
        self.rows.iter().map(|row| {
            self.columns
                .iter()
                .zip(row)
                .map(|(name, value)| (name.as_str(), value.as_deref().unwrap_or(NULL_TEXT)))
                .collect()
        })
    }
}

/// Drivers available to this build, keyed by vendor family.
#[derive(Default, Clone)]
pub struct DriverRegistry {
    drivers: HashMap<DriverFamily, Arc<dyn Driver>>,
}

impl DriverRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a driver, replacing any driver for the same family.
    pub fn register(&mut self, driver: Arc<dyn Driver>) {
        debug!(driver = driver.name(), family = %driver.family(), "Registering driver");
        self.drivers.insert(driver.family(), driver);
    }

    /// Builder-style [`register`](Self::register).
    pub fn with(mut self, driver: impl Driver + 'static) -> Self {
        self.register(Arc::new(driver));
        self
    }

    /// Families with a registered driver.
    pub fn families(&self) -> impl Iterator<Item = DriverFamily> + '_ {
        self.drivers.keys().copied()
    }

    /// Resolve a driver identifier to a registered driver.
    pub fn load(&self, driver_id: &str) -> DbProbeResult<Arc<dyn Driver>> {
        let family =
            DriverFamily::from_driver_id(driver_id).map_err(|e| DbProbeError::DriverLoad {
                driver: driver_id.to_string(),
                reason: e.to_string(),
            })?;

        self.drivers
            .get(&family)
            .cloned()
            .ok_or_else(|| DbProbeError::DriverLoad {
                driver: driver_id.to_string(),
                reason: format!("no {} driver is available in this build", family),
            })
    }
}

impl fmt::Debug for DriverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriverRegistry")
            .field("families", &self.drivers.keys().collect::<Vec<_>>())
            .finish()
    }
}
