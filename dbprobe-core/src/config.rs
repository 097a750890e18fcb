//! Connection configuration loaded from a properties file.
//!
//! # Recognized keys
//!
//! | Key              | Required | Meaning                                   |
//! |------------------|----------|-------------------------------------------|
//! | `db.username`    | yes      | Database user                             |
//! | `db.password`    | yes      | Database password                         |
//! | `driver.class`   | yes      | Driver identifier (selects the vendor)    |
//! | `test.query`     | yes      | Query to run once connected               |
//! | `db.server.name` | no       | Host; derived from `db.url` when blank    |
//! | `db.port`        | no       | Port; required when a host is given       |
//! | `sid`            | no       | Oracle SID used to build a missing URL    |
//! | `db.url`         | no       | Full JDBC URL                             |
//!
//! At least one of `db.url` and `sid` must be set.
//!
//! ```rust
//! use dbprobe_core::config::ConnectionConfig;
//! use dbprobe_core::properties::Properties;
//!
//! let props = Properties::parse(
//!     "db.server.name=db1\ndb.port=1521\nsid=orcl\n\
//!      db.username=scott\ndb.password=tiger\n\
//!      driver.class=oracle.jdbc.driver.OracleDriver\ntest.query=select 1 from dual;",
//! )
//! .unwrap();
//!
//! let config = ConnectionConfig::from_properties(&props).unwrap();
//! assert_eq!(config.url(), "jdbc:oracle:thin:@db1:1521:orcl");
//! assert!(config.url_synthesized());
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::endpoint::{extract_endpoint, synthesize_oracle_url, EndpointError};
use crate::properties::{Properties, PropertiesError};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "jdbctest.props";

/// Property keys.
pub mod keys {
    /// Database host.
    pub const SERVER_NAME: &str = "db.server.name";
    /// Database port.
    pub const PORT: &str = "db.port";
    /// Oracle SID.
    pub const SID: &str = "sid";
    /// Database user.
    pub const USERNAME: &str = "db.username";
    /// Database password.
    pub const PASSWORD: &str = "db.password";
    /// Driver identifier.
    pub const DRIVER_CLASS: &str = "driver.class";
    /// Query to execute.
    pub const TEST_QUERY: &str = "test.query";
    /// Full connection URL.
    pub const URL: &str = "db.url";
}

/// Errors raised while loading or validating the configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("file {} does not exist", path.display())]
    FileNotFound { path: PathBuf },

    /// The configuration file exists but could not be read.
    #[error("file {} is not readable: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be parsed.
    #[error("unable to load {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: PropertiesError,
    },

    /// A required property is missing or blank.
    #[error("required property {key} is not set")]
    Missing { key: &'static str },

    /// Neither `db.url` nor `sid` is set.
    #[error("both the db.url and sid properties are empty, at least one must be provided")]
    Incomplete,

    /// The port is not a valid TCP port number.
    #[error("specified port '{value}' could not be parsed as a valid port number")]
    InvalidPort { value: String },

    /// Host and port could not be derived from `db.url`.
    #[error(transparent)]
    Endpoint(#[from] EndpointError),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Validated, immutable connection settings.
#[derive(Clone)]
pub struct ConnectionConfig {
    host: String,
    port: u16,
    driver_id: String,
    username: String,
    password: String,
    sid: Option<String>,
    url: String,
    url_synthesized: bool,
    query: String,
}

impl ConnectionConfig {
    /// Load and validate a properties file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let bytes = std::fs::read(path).map_err(|source| ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let props = Properties::from_bytes(&bytes).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(path = %path.display(), entries = props.len(), "Properties file parsed");
        Self::from_properties(&props)
    }

    /// Validate a parsed set of properties.
    pub fn from_properties(props: &Properties) -> ConfigResult<Self> {
        let username = required(props, keys::USERNAME)?;
        let password = required(props, keys::PASSWORD)?;
        let driver_id = required(props, keys::DRIVER_CLASS)?;
        let query = required(props, keys::TEST_QUERY)?;

        let url = optional(props, keys::URL);
        let sid = optional(props, keys::SID);
        if url.is_none() && sid.is_none() {
            return Err(ConfigError::Incomplete);
        }

        let (host, port_text) = match (optional(props, keys::SERVER_NAME), &url) {
            (Some(host), _) => (host, required(props, keys::PORT)?),
            (None, Some(url)) => {
                debug!(url = %url, "db.server.name not set, deriving endpoint from db.url");
                let endpoint = extract_endpoint(url, &driver_id)?;
                (endpoint.host, endpoint.port)
            }
            (None, None) => {
                return Err(ConfigError::Missing {
                    key: keys::SERVER_NAME,
                });
            }
        };

        let port = parse_port(&port_text)?;

        let (url, url_synthesized) = match url {
            Some(url) => (url, false),
            None => {
                // `sid` is set here, checked above.
                let sid = sid.as_deref().unwrap_or_default();
                (synthesize_oracle_url(&host, &port_text, sid), true)
            }
        };

        Ok(Self {
            host,
            port,
            driver_id,
            username,
            password,
            sid,
            url,
            url_synthesized,
            query,
        })
    }

    /// Host used for the reachability probe.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port used for the reachability probe.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Driver identifier.
    pub fn driver_id(&self) -> &str {
        &self.driver_id
    }

    /// Database user.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Database password.
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Oracle SID, if configured.
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    /// Connection URL, configured or synthesized.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Whether the URL was built from host, port and SID.
    pub fn url_synthesized(&self) -> bool {
        self.url_synthesized
    }

    /// Query text as configured (trimmed).
    pub fn query(&self) -> &str {
        &self.query
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("driver_id", &self.driver_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("sid", &self.sid)
            .field("url", &self.url)
            .field("url_synthesized", &self.url_synthesized)
            .field("query", &self.query)
            .finish()
    }
}

fn optional(props: &Properties, key: &str) -> Option<String> {
    props
        .get(key)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn required(props: &Properties, key: &'static str) -> ConfigResult<String> {
    optional(props, key).ok_or(ConfigError::Missing { key })
}

fn parse_port(text: &str) -> ConfigResult<u16> {
    match text.parse::<u16>() {
        Ok(port) if port > 0 => Ok(port),
        _ => Err(ConfigError::InvalidPort {
            value: text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn base() -> Vec<(&'static str, &'static str)> {
        vec![
            (keys::SERVER_NAME, "db1"),
            (keys::PORT, "1521"),
            (keys::SID, "orcl"),
            (keys::USERNAME, "scott"),
            (keys::PASSWORD, "tiger"),
            (keys::DRIVER_CLASS, "oracle.jdbc.driver.OracleDriver"),
            (keys::TEST_QUERY, "select 1 from dual;"),
        ]
    }

    fn props_with(overrides: &[(&'static str, &'static str)]) -> Properties {
        let mut props: Properties = base().into_iter().collect();
        for (key, value) in overrides {
            props.set(*key, *value);
        }
        props
    }

    fn props_without(key: &str) -> Properties {
        base().into_iter().filter(|(k, _)| *k != key).collect()
    }

    #[test]
    fn test_synthesizes_oracle_url() {
        let config = ConnectionConfig::from_properties(&props_with(&[])).unwrap();
        assert_eq!(config.url(), "jdbc:oracle:thin:@db1:1521:orcl");
        assert!(config.url_synthesized());
        assert_eq!(config.host(), "db1");
        assert_eq!(config.port(), 1521);
        assert_eq!(config.sid(), Some("orcl"));
    }

    #[test]
    fn test_values_are_trimmed() {
        let props = props_with(&[
            (keys::SERVER_NAME, "  db1 "),
            (keys::PORT, " 1521\t"),
            (keys::SID, " orcl "),
            (keys::USERNAME, " scott "),
            (keys::TEST_QUERY, "  select 1 from dual  "),
        ]);
        let config = ConnectionConfig::from_properties(&props).unwrap();
        assert_eq!(config.url(), "jdbc:oracle:thin:@db1:1521:orcl");
        assert_eq!(config.username(), "scott");
        assert_eq!(config.query(), "select 1 from dual");
    }

    #[test]
    fn test_required_keys() {
        for key in [
            keys::USERNAME,
            keys::PASSWORD,
            keys::DRIVER_CLASS,
            keys::TEST_QUERY,
        ] {
            let err = ConnectionConfig::from_properties(&props_without(key)).unwrap_err();
            assert!(
                matches!(err, ConfigError::Missing { key: k } if k == key),
                "expected missing {key}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_blank_required_key() {
        let err = ConnectionConfig::from_properties(&props_with(&[(keys::PASSWORD, "   ")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Missing { key } if key == keys::PASSWORD));
        assert_eq!(err.to_string(), "required property db.password is not set");
    }

    #[test]
    fn test_username_checked_before_anything_else() {
        let props: Properties = [(keys::PORT, "not-a-port")].into_iter().collect();
        let err = ConnectionConfig::from_properties(&props).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { key } if key == keys::USERNAME));
    }

    #[test]
    fn test_url_or_sid_required() {
        let err = ConnectionConfig::from_properties(&props_without(keys::SID)).unwrap_err();
        assert!(matches!(err, ConfigError::Incomplete));
    }

    #[test]
    fn test_port_required_with_host() {
        let err = ConnectionConfig::from_properties(&props_without(keys::PORT)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { key } if key == keys::PORT));
    }

    #[test]
    fn test_invalid_port() {
        for value in ["abc", "15x21", "0", "70000", "-1"] {
            let mut props = props_with(&[]);
            props.set(keys::PORT, value);
            let err = ConnectionConfig::from_properties(&props).unwrap_err();
            assert!(
                matches!(&err, ConfigError::InvalidPort { value: v } if v == value),
                "expected invalid port for {value}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_explicit_url_is_kept() {
        let props = props_with(&[(keys::URL, " jdbc:oracle:thin:@other:1600:prod ")]);
        let config = ConnectionConfig::from_properties(&props).unwrap();
        assert_eq!(config.url(), "jdbc:oracle:thin:@other:1600:prod");
        assert!(!config.url_synthesized());
        // Explicit host still drives the probe.
        assert_eq!(config.host(), "db1");
        assert_eq!(config.port(), 1521);
    }

    #[test]
    fn test_endpoint_derived_from_oracle_url() {
        let mut props = props_without(keys::SERVER_NAME);
        props.set(keys::URL, "jdbc:oracle:thin:@ora.internal:1600:prod");
        let config = ConnectionConfig::from_properties(&props).unwrap();
        assert_eq!(config.host(), "ora.internal");
        assert_eq!(config.port(), 1600);
    }

    #[test]
    fn test_endpoint_derived_from_sqlserver_url() {
        let props: Properties = [
            (keys::USERNAME, "sa"),
            (keys::PASSWORD, "secret"),
            (keys::DRIVER_CLASS, "com.microsoft.sqlserver.jdbc.SQLServerDriver"),
            (keys::TEST_QUERY, "select 1"),
            (keys::URL, "jdbc:sqlserver://sql1;databaseName=sales"),
        ]
        .into_iter()
        .collect();
        let config = ConnectionConfig::from_properties(&props).unwrap();
        assert_eq!(config.host(), "sql1");
        assert_eq!(config.port(), 1433);
        assert_eq!(config.sid(), None);
    }

    #[test]
    fn test_extraction_errors_are_fatal() {
        let mut props = props_without(keys::SERVER_NAME);
        props.set(keys::URL, "jdbc:oracle:thin:@db1");
        let err = ConnectionConfig::from_properties(&props).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Endpoint(EndpointError::MalformedUrl { .. })
        ));

        let mut props = props_without(keys::SERVER_NAME);
        props.set(keys::URL, "jdbc:postgresql://pg:5432/app");
        props.set(keys::DRIVER_CLASS, "org.postgresql.Driver");
        let err = ConnectionConfig::from_properties(&props).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Endpoint(EndpointError::UnsupportedDriver(_))
        ));
    }

    #[test]
    fn test_extracted_port_is_validated() {
        let mut props = props_without(keys::SERVER_NAME);
        props.set(keys::URL, "jdbc:oracle:thin:@db1:port:orcl");
        let err = ConnectionConfig::from_properties(&props).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { value } if value == "port"));
    }

    #[test]
    fn test_host_missing_without_url() {
        let err = ConnectionConfig::from_properties(&props_without(keys::SERVER_NAME)).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { key } if key == keys::SERVER_NAME));
    }

    #[test]
    fn test_debug_redacts_password() {
        let config = ConnectionConfig::from_properties(&props_with(&[])).unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("tiger"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConnectionConfig::load(&dir.path().join(CONFIG_FILE_NAME)).unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound { .. }));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_load_directory_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = ConnectionConfig::load(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Unreadable { .. }));
    }

    #[test]
    fn test_load_parse_failure() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "db.username=\\uXYZW").unwrap();
        let err = ConnectionConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for (key, value) in base() {
            writeln!(file, "{key}={value}").unwrap();
        }
        let config = ConnectionConfig::load(file.path()).unwrap();
        assert_eq!(config.url(), "jdbc:oracle:thin:@db1:1521:orcl");
    }

    #[test]
    fn test_load_latin1_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        for (key, value) in base() {
            writeln!(file, "{key}={value}").unwrap();
        }
        file.write_all(b"db.password=p\xE4ss\n").unwrap();
        let config = ConnectionConfig::load(file.path()).unwrap();
        assert_eq!(config.password(), "p\u{e4}ss");
    }
}
