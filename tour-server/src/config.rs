//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Default directory for fixture place data in offline mode.
pub const DEFAULT_FIXTURES_DIR: &str = "data/places";

/// Default directory for static assets.
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Errors reading the server configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {var} {value:?}: {message}")]
    Invalid {
        var: &'static str,
        value: String,
        message: String,
    },
}

/// Settings read once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Google Maps API key. Without one the server runs offline.
    pub api_key: Option<String>,

    /// Override for the Google Maps API base URL.
    pub api_base: Option<String>,

    pub bind_addr: SocketAddr,
    pub static_dir: String,
    pub fixtures_dir: PathBuf,
}

impl ServerConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through `lookup`. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

        let bind = get("TOUR_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::Invalid {
                var: "TOUR_BIND_ADDR",
                value: bind.clone(),
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            api_key: get("GOOGLE_MAPS_API_KEY"),
            api_base: get("GOOGLE_MAPS_API_BASE"),
            bind_addr,
            static_dir: get("TOUR_STATIC_DIR").unwrap_or_else(|| DEFAULT_STATIC_DIR.to_string()),
            fixtures_dir: get("TOUR_FIXTURES_DIR")
                .unwrap_or_else(|| DEFAULT_FIXTURES_DIR.to_string())
                .into(),
        })
    }

    pub fn is_offline(&self) -> bool {
        self.api_key.is_none()
    }
}
