//! Raw TCP reachability check.
//!
//! The probe opens a plain TCP connection to the database listener and closes
//! it again. It runs before the driver connects so that an unreachable host or
//! closed port is reported as such rather than as a driver failure.

use std::io;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;
use tokio::net::{TcpStream, lookup_host};
use tracing::{debug, warn};

/// Default time allowed for the TCP connect.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(2000);

/// Why a reachability probe failed.
#[derive(Error, Debug)]
pub enum ProbeFailure {
    /// The connect did not complete in time.
    #[error("connection attempt timed out after {}ms", .0.as_millis())]
    TimedOut(Duration),

    /// The host name did not resolve to any address.
    #[error("unable to resolve host {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: io::Error,
    },

    /// Every resolved address refused or failed the connect.
    #[error("{0}")]
    Io(#[from] io::Error),
}

impl ProbeFailure {
    /// Check if this failure is a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TimedOut(_))
    }

    /// Check if the host name failed to resolve.
    pub fn is_resolve(&self) -> bool {
        matches!(self, Self::Resolve { .. })
    }
}

/// TCP connect-with-timeout prober.
#[derive(Debug, Clone, Copy)]
pub struct Prober {
    timeout: Duration,
}

impl Default for Prober {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

impl Prober {
    /// Create a prober with the given connect timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// The configured timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Connect to `host:port` once and report the failure cause, if any.
    pub async fn check(&self, host: &str, port: u16) -> Result<(), ProbeFailure> {
        debug!(host = %host, port = port, timeout_ms = self.timeout.as_millis() as u64, "Probing endpoint");

        tokio::time::timeout(self.timeout, connect(host, port))
            .await
            .map_err(|_| ProbeFailure::TimedOut(self.timeout))??;

        debug!(host = %host, port = port, "Endpoint reachable");
        Ok(())
    }

    /// Connect to `host:port` once; `true` if the connect succeeded.
    pub async fn probe(&self, host: &str, port: u16) -> bool {
        match self.check(host, port).await {
            Ok(()) => true,
            Err(e) => {
                warn!(host = %host, port = port, error = %e, "Endpoint unreachable");
                false
            }
        }
    }
}

/// Resolve `host`, then try each address in order until one accepts.
async fn connect(host: &str, port: u16) -> Result<(), ProbeFailure> {
    let resolve_error = |source: io::Error| ProbeFailure::Resolve {
        host: host.to_string(),
        source,
    };

    let addrs: Vec<SocketAddr> = lookup_host((host, port))
        .await
        .map_err(resolve_error)?
        .collect();
    if addrs.is_empty() {
        return Err(resolve_error(io::Error::new(
            io::ErrorKind::NotFound,
            "no addresses returned",
        )));
    }

    let mut last_error = None;
    for addr in addrs {
        match TcpStream::connect(addr).await {
            // Dropping the stream closes it.
            Ok(_stream) => return Ok(()),
            Err(e) => {
                debug!(addr = %addr, error = %e, "Connect attempt failed");
                last_error = Some(e);
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "no address accepted"))
        .into())
}
