//! Process configuration read from the environment

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use agri_facade::{CatalogError, MarketError};
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_TIMEOUT_MS: u64 = 5000;

/// Startup failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("catalog: {0}")]
    Catalog(#[from] CatalogError),

    #[error("engine: {0}")]
    Engine(#[from] MarketError),
}

/// Server settings
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the `*_prices.csv` files
    pub data_dir: PathBuf,
    /// Optional JSON catalog replacing the built-in crops and locations
    pub catalog: Option<PathBuf>,
    /// Wall-clock budget for one forecast computation
    pub forecast_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from("."),
            catalog: None,
            forecast_timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ServerConfig {
    /// Read `HOST`, `PORT`, `AGRI_DATA_DIR`, `AGRI_CATALOG` and
    /// `AGRI_FORECAST_TIMEOUT_MS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                name: "PORT",
                value: port.clone(),
                reason: "must be a port number".to_string(),
            })?;
        }
        if let Some(dir) = lookup("AGRI_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        config.catalog = lookup("AGRI_CATALOG")
            .filter(|path| !path.is_empty())
            .map(PathBuf::from);
        if let Some(ms) = lookup("AGRI_FORECAST_TIMEOUT_MS") {
            let parsed: u64 = ms.parse().map_err(|_| ConfigError::InvalidValue {
                name: "AGRI_FORECAST_TIMEOUT_MS",
                value: ms.clone(),
                reason: "must be a whole number of milliseconds".to_string(),
            })?;
            if parsed == 0 {
                return Err(ConfigError::InvalidValue {
                    name: "AGRI_FORECAST_TIMEOUT_MS",
                    value: ms,
                    reason: "must be greater than zero".to_string(),
                });
            }
            config.forecast_timeout = Duration::from_millis(parsed);
        }

        Ok(config)
    }

    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| ConfigError::InvalidValue {
            name: "HOST",
            value: self.host.clone(),
            reason: "not a valid listen address".to_string(),
        })
    }
}
