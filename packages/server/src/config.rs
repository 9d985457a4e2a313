//! Server configuration read from the environment.

use std::path::PathBuf;

/// Default bind address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default port.
pub const DEFAULT_PORT: u16 = 10000;

/// Service name reported by the health check.
pub const DEFAULT_SERVICE_NAME: &str = "Phoenix Safety App";

/// Which hosting variant the server runs as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    /// API only; static assets are served elsewhere.
    Generic,
    /// API plus the static asset directory under `/static`.
    StaticHost,
}

/// Runtime configuration for the HTTP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
    /// Name reported by `/health`.
    pub service_name: String,
    /// Directory served under `/static`, if any.
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            port: DEFAULT_PORT,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            static_dir: None,
        }
    }
}

impl ServerConfig {
    /// Reads `BIND_ADDR`, `PORT`, `SERVICE_NAME` and `STATIC_DIR`, falling
    /// back to the defaults for anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT").and_then(|p| match p.parse::<u16>() {
            Ok(port) => Some(port),
            Err(e) => {
                log::warn!("Ignoring invalid PORT '{p}': {e}");
                None
            }
        });

        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: port.unwrap_or(defaults.port),
            service_name: lookup("SERVICE_NAME").unwrap_or(defaults.service_name),
            static_dir: lookup("STATIC_DIR")
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from),
        }
    }

    /// The hosting variant implied by this configuration.
    #[must_use]
    pub const fn deployment(&self) -> Deployment {
        if self.static_dir.is_some() {
            Deployment::StaticHost
        } else {
            Deployment::Generic
        }
    }
}
