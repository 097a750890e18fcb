//! Host and port extraction from vendor JDBC connection URLs.
//!
//! Two URL dialects are understood:
//!
//! ## Oracle (descriptor style)
//! ```text
//! jdbc:oracle:thin:@host:port:sid
//! jdbc:oracle:thin:@(DESCRIPTION=(ADDRESS=(PROTOCOL=TCP)(HOST=host)(PORT=port))...)
//! ```
//!
//! ## SQL Server (simple style)
//! ```text
//! jdbc:sqlserver://host:port;databaseName=db
//! jdbc:sqlserver://host;databaseName=db
//! ```
//!
//! The URL is split on every literal `:` and the endpoint is read from fixed
//! field positions. No general URI parsing is attempted.
//!
//! ```rust
//! use dbprobe_core::endpoint::{extract_endpoint, DriverFamily};
//!
//! let endpoint = extract_endpoint(
//!     "jdbc:oracle:thin:@db1:1521:orcl",
//!     "oracle.jdbc.driver.OracleDriver",
//! )
//! .unwrap();
//! assert_eq!(endpoint.host, "db1");
//! assert_eq!(endpoint.port, "1521");
//!
//! assert_eq!(DriverFamily::SqlServer.default_port(), 1433);
//! ```

use std::fmt;
use std::sync::OnceLock;

use regex_lite::Regex;
use thiserror::Error;
use tracing::debug;

/// Default listener port for Oracle databases.
pub const ORACLE_DEFAULT_PORT: u16 = 1521;

/// Default listener port for SQL Server databases.
pub const SQLSERVER_DEFAULT_PORT: u16 = 1433;

const FIELD_DELIMITER: char = ':';

/// Errors raised while deriving an endpoint from a connection URL.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EndpointError {
    /// The driver identifier names neither an Oracle nor a SQL Server driver.
    #[error("unsupported driver '{0}': expected an Oracle or SQL Server driver")]
    UnsupportedDriver(String),

    /// The URL does not have the fields the dialect requires.
    #[error("malformed connection URL '{url}': {reason}")]
    MalformedUrl { url: String, reason: String },
}

impl EndpointError {
    fn malformed(url: &str, reason: impl Into<String>) -> Self {
        Self::MalformedUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for endpoint extraction.
pub type EndpointResult<T> = Result<T, EndpointError>;

/// The database vendor family a driver identifier belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriverFamily {
    /// Oracle, descriptor-style URLs.
    Oracle,
    /// Microsoft SQL Server, `//host:port;params` URLs.
    SqlServer,
}

impl DriverFamily {
    /// Classify a driver identifier such as `oracle.jdbc.driver.OracleDriver`.
    ///
    /// Matching is a case-insensitive substring test; Oracle is checked first.
    pub fn from_driver_id(driver_id: &str) -> EndpointResult<Self> {
        let upper = driver_id.to_uppercase();
        if upper.contains("ORACLE") {
            Ok(Self::Oracle)
        } else if upper.contains("SQLSERVER") {
            Ok(Self::SqlServer)
        } else {
            Err(EndpointError::UnsupportedDriver(driver_id.to_string()))
        }
    }

    /// Get the default port for this family.
    pub fn default_port(&self) -> u16 {
        match self {
            Self::Oracle => ORACLE_DEFAULT_PORT,
            Self::SqlServer => SQLSERVER_DEFAULT_PORT,
        }
    }

    /// Get the family name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Oracle => "oracle",
            Self::SqlServer => "sqlserver",
        }
    }
}

impl fmt::Display for DriverFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A host and port pair. The port is kept as text; callers validate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Host name or address.
    pub host: String,
    /// Port as written in the URL.
    pub port: String,
}

impl Endpoint {
    fn new(host: &str, port: &str) -> Self {
        Self {
            host: host.trim().to_string(),
            port: port.trim().to_string(),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Derive the host and port from a connection URL for the given driver.
pub fn extract_endpoint(url: &str, driver_id: &str) -> EndpointResult<Endpoint> {
    let family = DriverFamily::from_driver_id(driver_id)?;
    let fields = UrlFields::split(url);

    let endpoint = match family {
        DriverFamily::Oracle => extract_descriptor_endpoint(&fields)?,
        DriverFamily::SqlServer => extract_simple_endpoint(&fields)?,
    };

    debug!(family = %family, host = %endpoint.host, port = %endpoint.port, "Endpoint extracted from URL");
    Ok(endpoint)
}

/// Build the Oracle thin URL used when no `db.url` is configured.
pub fn synthesize_oracle_url(host: &str, port: &str, sid: &str) -> String {
    format!("jdbc:oracle:thin:@{}:{}:{}", host, port, sid)
}

/// `:`-separated URL fields with bounds-checked access.
struct UrlFields<'a> {
    url: &'a str,
    fields: Vec<&'a str>,
}

impl<'a> UrlFields<'a> {
    fn split(url: &'a str) -> Self {
        Self {
            url,
            fields: url.split(FIELD_DELIMITER).collect(),
        }
    }

    fn get(&self, index: usize) -> EndpointResult<&'a str> {
        self.optional(index).ok_or_else(|| {
            EndpointError::malformed(
                self.url,
                format!(
                    "expected a field at position {} but found only {} ':'-separated fields",
                    index,
                    self.fields.len()
                ),
            )
        })
    }

    fn optional(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }
}

fn host_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"(?i)\(HOST=").expect("HOST marker pattern is valid"))
}

fn port_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"(?i)\(PORT=").expect("PORT marker pattern is valid"))
}

fn extract_descriptor_endpoint(fields: &UrlFields<'_>) -> EndpointResult<Endpoint> {
    let field = fields.get(3)?;

    // Drop the `@` that introduces the connect descriptor.
    let mut chars = field.chars();
    if chars.next().is_none() {
        return Err(EndpointError::malformed(
            fields.url,
            "the connect descriptor after the driver type is empty",
        ));
    }
    let descriptor: String = chars.filter(|c| !c.is_whitespace()).collect();

    match descriptor_clause(fields.url, &descriptor, host_marker(), "HOST")? {
        Some(host) => {
            let port = descriptor_clause(fields.url, &descriptor, port_marker(), "PORT")?
                .map(str::to_string)
                .unwrap_or_else(|| ORACLE_DEFAULT_PORT.to_string());
            Ok(Endpoint::new(host, &port))
        }
        None => {
            let port = fields.get(4)?;
            Ok(Endpoint::new(&descriptor, port))
        }
    }
}

/// Value between a `(NAME=` marker and the first `)` after it.
fn descriptor_clause<'d>(
    url: &str,
    descriptor: &'d str,
    marker: &Regex,
    name: &str,
) -> EndpointResult<Option<&'d str>> {
    let Some(found) = marker.find(descriptor) else {
        return Ok(None);
    };

    let rest = &descriptor[found.end()..];
    let close = rest.find(')').ok_or_else(|| {
        EndpointError::malformed(url, format!("unterminated ({}= clause", name))
    })?;

    Ok(Some(&rest[..close]))
}

fn extract_simple_endpoint(fields: &UrlFields<'_>) -> EndpointResult<Endpoint> {
    let field = fields.get(2)?;
    let host_field = field.strip_prefix("//").unwrap_or(field);
    let host = truncate_at(host_field, ';');

    let port = match fields.optional(3) {
        // Instance name first, connection parameters second.
        Some(port_field) => truncate_at(truncate_at(port_field, '\\'), ';').to_string(),
        None => SQLSERVER_DEFAULT_PORT.to_string(),
    };

    Ok(Endpoint::new(host, &port))
}

fn truncate_at(value: &str, delimiter: char) -> &str {
    value.split_once(delimiter).map_or(value, |(head, _)| head)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const ORACLE: &str = "oracle.jdbc.driver.OracleDriver";
    const SQLSERVER: &str = "com.microsoft.sqlserver.jdbc.SQLServerDriver";

    fn endpoint(host: &str, port: &str) -> Endpoint {
        Endpoint {
            host: host.to_string(),
            port: port.to_string(),
        }
    }

    #[test]
    fn test_driver_family_classification() {
        assert_eq!(DriverFamily::from_driver_id(ORACLE).unwrap(), DriverFamily::Oracle);
        assert_eq!(
            DriverFamily::from_driver_id(SQLSERVER).unwrap(),
            DriverFamily::SqlServer
        );
        assert_eq!(
            DriverFamily::from_driver_id("OrAcLe").unwrap(),
            DriverFamily::Oracle
        );
        assert_eq!(
            DriverFamily::from_driver_id("sqlserver").unwrap(),
            DriverFamily::SqlServer
        );
    }

    #[test]
    fn test_oracle_wins_when_both_tokens_present() {
        assert_eq!(
            DriverFamily::from_driver_id("oracle-to-sqlserver-bridge").unwrap(),
            DriverFamily::Oracle
        );
    }

    #[test]
    fn test_unsupported_driver() {
        for driver in ["org.postgresql.Driver", "com.mysql.cj.jdbc.Driver", "", "SQL Server"] {
            let err = extract_endpoint("jdbc:oracle:thin:@db1:1521:orcl", driver).unwrap_err();
            assert_eq!(err, EndpointError::UnsupportedDriver(driver.to_string()));
        }
    }

    #[test]
    fn test_default_ports() {
        assert_eq!(DriverFamily::Oracle.default_port(), 1521);
        assert_eq!(DriverFamily::SqlServer.default_port(), 1433);
        assert_eq!(DriverFamily::Oracle.to_string(), "oracle");
    }

    #[test]
    fn test_oracle_host_port_sid() {
        let ep = extract_endpoint("jdbc:oracle:thin:@db1.example.com:1522:orcl", ORACLE).unwrap();
        assert_eq!(ep, endpoint("db1.example.com", "1522"));
    }

    #[test]
    fn test_oracle_host_port_without_sid() {
        let ep = extract_endpoint("jdbc:oracle:thin:@10.0.0.5:1521", ORACLE).unwrap();
        assert_eq!(ep, endpoint("10.0.0.5", "1521"));
    }

    #[test]
    fn test_oracle_descriptor() {
        let url = "jdbc:oracle:thin:@(DESCRIPTION=(ADDRESS=(PROTOCOL=TCP)(HOST=dbhost)(PORT=1600))(CONNECT_DATA=(SERVICE_NAME=svc)))";
        let ep = extract_endpoint(url, ORACLE).unwrap();
        assert_eq!(ep, endpoint("dbhost", "1600"));
    }

    #[test]
    fn test_oracle_descriptor_case_and_whitespace() {
        let url = "jdbc:oracle:thin:@( description = ( address = (protocol=tcp)( host = dbhost )( Port = 1600 ) ) )";
        let ep = extract_endpoint(url, ORACLE).unwrap();
        assert_eq!(ep, endpoint("dbhost", "1600"));
    }

    #[test]
    fn test_oracle_descriptor_without_port_uses_default() {
        let url = "jdbc:oracle:thin:@(DESCRIPTION=(ADDRESS=(PROTOCOL=TCP)(HOST=dbhost))(CONNECT_DATA=(SID=orcl)))";
        let ep = extract_endpoint(url, ORACLE).unwrap();
        assert_eq!(ep, endpoint("dbhost", "1521"));
    }

    #[test]
    fn test_oracle_descriptor_first_host_wins() {
        let url = "jdbc:oracle:thin:@(DESCRIPTION=(ADDRESS_LIST=(ADDRESS=(HOST=primary)(PORT=1521))(ADDRESS=(HOST=standby)(PORT=1522))))";
        let ep = extract_endpoint(url, ORACLE).unwrap();
        assert_eq!(ep, endpoint("primary", "1521"));
    }

    #[test]
    fn test_oracle_unterminated_host_clause() {
        let err = extract_endpoint("jdbc:oracle:thin:@(DESCRIPTION=(HOST=dbhost", ORACLE).unwrap_err();
        assert!(matches!(err, EndpointError::MalformedUrl { .. }));
        assert!(err.to_string().contains("(HOST="));
    }

    #[test]
    fn test_oracle_unterminated_port_clause() {
        // A HOST clause is present, so the default port is not substituted.
        let err = extract_endpoint("jdbc:oracle:thin:@(HOST=h)(PORT=1600", ORACLE).unwrap_err();
        match err {
            EndpointError::MalformedUrl { url, reason } => {
                assert_eq!(url, "jdbc:oracle:thin:@(HOST=h)(PORT=1600");
                assert_eq!(reason, "unterminated (PORT= clause");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_oracle_missing_port_field() {
        let err = extract_endpoint("jdbc:oracle:thin:@db1", ORACLE).unwrap_err();
        match err {
            EndpointError::MalformedUrl { url, reason } => {
                assert_eq!(url, "jdbc:oracle:thin:@db1");
                assert!(reason.contains("position 4"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_oracle_too_few_fields() {
        let err = extract_endpoint("jdbc:oracle", ORACLE).unwrap_err();
        assert!(matches!(err, EndpointError::MalformedUrl { .. }));
    }

    #[test]
    fn test_oracle_empty_descriptor() {
        let err = extract_endpoint("jdbc:oracle:thin::1521", ORACLE).unwrap_err();
        assert!(matches!(err, EndpointError::MalformedUrl { .. }));
    }

    #[test]
    fn test_oracle_values_are_trimmed() {
        let ep = extract_endpoint("jdbc:oracle:thin:@db1: 1521 :orcl", ORACLE).unwrap();
        assert_eq!(ep, endpoint("db1", "1521"));
    }

    #[test]
    fn test_sqlserver_host_port_params() {
        let ep = extract_endpoint(
            "jdbc:sqlserver://sql1.example.com:1434;databaseName=sales;encrypt=true",
            SQLSERVER,
        )
        .unwrap();
        assert_eq!(ep, endpoint("sql1.example.com", "1434"));
    }

    #[test]
    fn test_sqlserver_without_port_uses_default() {
        let ep = extract_endpoint("jdbc:sqlserver://sql1;databaseName=sales", SQLSERVER).unwrap();
        assert_eq!(ep, endpoint("sql1", "1433"));

        let ep = extract_endpoint("jdbc:sqlserver://sql1", SQLSERVER).unwrap();
        assert_eq!(ep, endpoint("sql1", "1433"));
    }

    #[test]
    fn test_sqlserver_port_with_instance_suffix() {
        let ep = extract_endpoint("jdbc:sqlserver://sql1:1500\\SQLEXPRESS;databaseName=x", SQLSERVER)
            .unwrap();
        assert_eq!(ep, endpoint("sql1", "1500"));
    }

    #[test]
    fn test_sqlserver_backslash_checked_before_semicolon() {
        // The parameter value contains a backslash; truncation at `\` still runs first.
        let ep = extract_endpoint("jdbc:sqlserver://sql1:1500;user=DOMAIN\\me", SQLSERVER).unwrap();
        assert_eq!(ep, endpoint("sql1", "1500"));
    }

    #[test]
    fn test_sqlserver_without_slashes() {
        let ep = extract_endpoint("jdbc:sqlserver:sql1:1433", SQLSERVER).unwrap();
        assert_eq!(ep, endpoint("sql1", "1433"));
    }

    #[test]
    fn test_sqlserver_too_few_fields() {
        let err = extract_endpoint("jdbc:sqlserver", SQLSERVER).unwrap_err();
        assert!(matches!(err, EndpointError::MalformedUrl { .. }));
    }

    #[test]
    fn test_synthesize_oracle_url() {
        assert_eq!(
            synthesize_oracle_url("db1", "1521", "orcl"),
            "jdbc:oracle:thin:@db1:1521:orcl"
        );
    }

    #[test]
    fn test_synthesized_url_extracts_back() {
        for (host, port) in [("db1", "1521"), ("10.1.2.3", "1600"), ("ora.internal", "2484")] {
            let url = synthesize_oracle_url(host, port, "orcl");
            assert_eq!(extract_endpoint(&url, ORACLE).unwrap(), endpoint(host, port));
        }
    }

    #[test]
    fn test_endpoint_display() {
        assert_eq!(endpoint("db1", "1521").to_string(), "db1:1521");
    }
}
