//! Oracle JDBC thin URL handling.
//!
//! JDBC thin URLs come in three shapes:
//!
//! ```text
//! jdbc:oracle:thin:@host:port:sid
//! jdbc:oracle:thin:@//host:port/service
//! jdbc:oracle:thin:@(DESCRIPTION=...)
//! ```
//!
//! The Oracle client accepts the last two directly. The SID form has no
//! Easy Connect equivalent and is rewritten as a connect descriptor.

use crate::error::{OracleError, OracleResult};

const JDBC_PREFIX: &str = "jdbc:oracle:";

/// Convert a JDBC Oracle URL into an Oracle client connect string.
pub fn connect_string_from_jdbc(url: &str) -> OracleResult<String> {
    let url = url.trim();
    let is_oracle = url
        .get(..JDBC_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(JDBC_PREFIX));
    if !is_oracle {
        return Err(OracleError::config(format!(
            "not an Oracle JDBC URL (expected {JDBC_PREFIX}thin:@...)"
        )));
    }

    let (_, target) = url
        .split_once('@')
        .ok_or_else(|| OracleError::config("missing '@' before the connect target"))?;
    let target = target.trim();

    if target.is_empty() {
        return Err(OracleError::config("empty connect target"));
    }

    if target.starts_with('(') || target.starts_with("//") {
        return Ok(target.to_string());
    }

    let parts: Vec<&str> = target.split(':').collect();
    match parts.as_slice() {
        [host, port, sid] => Ok(format!(
            "(DESCRIPTION=(ADDRESS=(PROTOCOL=TCP)(HOST={})(PORT={}))(CONNECT_DATA=(SID={})))",
            host.trim(),
            port.trim(),
            sid.trim()
        )),
        [host, port] => Ok(format!("{}:{}", host.trim(), port.trim())),
        [host] => Ok(host.trim().to_string()),
        _ => Err(OracleError::config(format!(
            "unrecognized connect target: {}",
            target
        ))),
    }
}
