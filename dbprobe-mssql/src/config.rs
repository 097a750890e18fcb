//! Microsoft SQL Server connection configuration.

use std::time::Duration;

use dbprobe_core::endpoint::SQLSERVER_DEFAULT_PORT;
use tiberius::{AuthMethod, Config, EncryptionLevel};

use crate::error::{MssqlError, MssqlResult};

const JDBC_PREFIX: &str = "jdbc:sqlserver:";

/// Microsoft SQL Server connection configuration.
#[derive(Debug, Clone)]
pub struct MssqlConfig {
    /// Server host.
    pub host: String,
    /// Server port (default: 1433).
    pub port: u16,
    /// Database name; the login's default database when absent.
    pub database: Option<String>,
    /// Username for SQL Server authentication.
    pub username: Option<String>,
    /// Password for SQL Server authentication.
    pub password: Option<String>,
    /// Use Windows Authentication (Integrated Security).
    pub windows_auth: bool,
    /// Encryption level.
    pub encryption: EncryptionMode,
    /// Trust server certificate.
    pub trust_cert: bool,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Application name (shown in sys.dm_exec_sessions).
    pub application_name: Option<String>,
    /// Instance name (for named instances).
    pub instance_name: Option<String>,
    /// Whether the URL named a port. A named instance without one is
    /// located through the SQL Server Browser.
    pub port_specified: bool,
}

/// Encryption mode for connections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncryptionMode {
    /// Encryption is off.
    Off,
    /// Encryption is on.
    #[default]
    On,
    /// Encryption is required.
    Required,
    /// Don't use encryption.
    NotSupported,
}

impl From<EncryptionMode> for EncryptionLevel {
    fn from(mode: EncryptionMode) -> Self {
        match mode {
            EncryptionMode::Off => EncryptionLevel::Off,
            EncryptionMode::On => EncryptionLevel::On,
            EncryptionMode::Required => EncryptionLevel::Required,
            EncryptionMode::NotSupported => EncryptionLevel::NotSupported,
        }
    }
}

impl Default for MssqlConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: SQLSERVER_DEFAULT_PORT,
            database: None,
            username: None,
            password: None,
            windows_auth: false,
            encryption: EncryptionMode::On,
            trust_cert: false,
            connect_timeout: Duration::from_secs(30),
            application_name: Some("dbprobe".to_string()),
            instance_name: None,
            port_specified: false,
        }
    }
}

impl MssqlConfig {
    /// Parse a SQL Server JDBC URL.
    ///
    /// Format:
    /// `jdbc:sqlserver://[serverName[\instanceName][:portNumber]][;property=value]*`
    ///
    /// Credentials in the URL are kept but are normally replaced by
    /// [`with_credentials`](Self::with_credentials).
    pub fn from_jdbc_url(url: &str) -> MssqlResult<Self> {
        let url = url.trim();
        let rest = url
            .get(..JDBC_PREFIX.len())
            .filter(|prefix| prefix.eq_ignore_ascii_case(JDBC_PREFIX))
            .map(|_| &url[JDBC_PREFIX.len()..])
            .ok_or_else(|| {
                MssqlError::config(format!("not a SQL Server JDBC URL (expected {JDBC_PREFIX}//...)"))
            })?;
        let rest = rest.strip_prefix("//").unwrap_or(rest);

        let (server, properties) = rest.split_once(';').unwrap_or((rest, ""));
        let mut config = Self::default();
        config.apply_server(server)?;

        for part in properties.split(';') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }

            let (key, value) = part.split_once('=').ok_or_else(|| {
                MssqlError::config(format!("invalid connection property: {}", part))
            })?;
            config.apply_property(&key.trim().to_lowercase(), value.trim())?;
        }

        Ok(config)
    }

    fn apply_server(&mut self, server: &str) -> MssqlResult<()> {
        if server.is_empty() {
            return Ok(());
        }

        // Both `host\instance:port` and `host:port\instance` are accepted.
        let (host_part, port_part) = match server.rsplit_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (server, None),
        };

        let host = match host_part.split_once('\\') {
            Some((host, instance)) => {
                self.instance_name = Some(instance.to_string());
                host
            }
            None => host_part,
        };
        self.host = host.to_string();

        if let Some(port_part) = port_part {
            let port = match port_part.split_once('\\') {
                Some((port, instance)) => {
                    self.instance_name = Some(instance.to_string());
                    port
                }
                None => port_part,
            };
            self.port = parse_port(port)?;
            self.port_specified = true;
        }
        Ok(())
    }

    fn apply_property(&mut self, key: &str, value: &str) -> MssqlResult<()> {
        match key {
            "servername" | "server" => self.host = value.to_string(),
            "portnumber" | "port" => {
                self.port = parse_port(value)?;
                self.port_specified = true;
            }
            "instancename" => self.instance_name = Some(value.to_string()),
            "databasename" | "database" => self.database = Some(value.to_string()),
            "user" | "username" => self.username = Some(value.to_string()),
            "password" => self.password = Some(value.to_string()),
            "integratedsecurity" => self.windows_auth = is_true(value),
            "encrypt" => {
                self.encryption = match value.to_lowercase().as_str() {
                    "true" | "yes" | "mandatory" => EncryptionMode::On,
                    "false" | "no" | "optional" => EncryptionMode::Off,
                    "strict" => EncryptionMode::Required,
                    _ => EncryptionMode::On,
                };
            }
            "trustservercertificate" => self.trust_cert = is_true(value),
            "logintimeout" => {
                let secs = value.parse::<u64>().map_err(|_| {
                    MssqlError::config(format!("invalid loginTimeout: {}", value))
                })?;
                self.connect_timeout = Duration::from_secs(secs);
            }
            "applicationname" => self.application_name = Some(value.to_string()),
            _ => {}
        }
        Ok(())
    }

    /// Replace the credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Whether the port must be looked up through the SQL Server Browser.
    pub fn uses_sql_browser(&self) -> bool {
        self.instance_name.is_some() && !self.port_specified
    }

    /// Convert to a Tiberius Config.
    pub fn to_tiberius_config(&self) -> MssqlResult<Config> {
        let mut config = Config::new();

        config.host(&self.host);
        config.port(self.port);

        if let Some(ref database) = self.database {
            config.database(database);
        }

        if let Some(ref instance) = self.instance_name {
            config.instance_name(instance);
        }

        if let Some(ref app_name) = self.application_name {
            config.application_name(app_name);
        }

        // Set authentication method
        if self.windows_auth {
            #[cfg(windows)]
            {
                config.authentication(AuthMethod::Integrated);
            }
            #[cfg(not(windows))]
            {
                return Err(MssqlError::config(
                    "Windows Authentication is only supported on Windows",
                ));
            }
        } else if let (Some(user), Some(pass)) = (&self.username, &self.password) {
            config.authentication(AuthMethod::sql_server(user, pass));
        } else {
            return Err(MssqlError::config(
                "either username/password or Windows Authentication is required",
            ));
        }

        config.encryption(self.encryption.into());

        if self.trust_cert {
            config.trust_cert();
        }

        Ok(config)
    }
}

fn parse_port(value: &str) -> MssqlResult<u16> {
    value
        .trim()
        .parse()
        .map_err(|_| MssqlError::config(format!("invalid port number: {}", value)))
}

fn is_true(value: &str) -> bool {
    matches!(value.to_lowercase().as_str(), "true" | "yes" | "sspi")
}
