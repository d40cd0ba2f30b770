//! Runtime configuration read from the environment
//!
//! `.env` is loaded by `main` before `Config::from_env` runs, so every value
//! here can come from either the process environment or that file.

use std::fmt;

use thiserror::Error;
use tracing::{info, warn};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE_URL: &str = "submissions.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        source: std::num::ParseIntError,
    },
}

/// Server configuration
///
/// - `HOST` - Bind host (default: 0.0.0.0)
/// - `PORT` - Bind port (default: 8080)
/// - `DATABASE_URL` - Path to the database file (default: "submissions.db")
/// - `LINK_TOKEN` - Shared token required to read submissions (default: unset)
#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub link_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| {
                    info!("{key} not set, using default: {default}");
                    default.to_string()
                })
        };

        let port_raw = var("PORT", &DEFAULT_PORT.to_string());
        let port = port_raw
            .parse::<u16>()
            .map_err(|source| ConfigError::InvalidPort {
                value: port_raw.clone(),
                source,
            })?;

        let link_token = lookup("LINK_TOKEN")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        if link_token.is_none() {
            warn!("LINK_TOKEN not set, the submissions listing will reject every request");
        }

        Ok(Self {
            host: var("HOST", DEFAULT_HOST),
            port,
            database_url: var("DATABASE_URL", DEFAULT_DATABASE_URL),
            link_token,
        })
    }

    /// Host and port to bind; the host may be an IP literal or a name
    /// resolved at bind time
    pub fn bind_target(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url)
            .field("link_token", &self.link_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
