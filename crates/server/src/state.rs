use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use agri_facade::{Catalog, CropMarket, CsvSeriesStore, EngineConfig};

use crate::config::{ConfigError, ServerConfig};

/// Shared application state available to all route handlers via Axum's
/// `State` extractor.
pub struct AppState {
    /// Market service over the catalog and the CSV store; cheap to clone
    /// into blocking tasks.
    pub market: CropMarket,

    /// Months forecast when a request does not say
    pub default_months: usize,

    /// Budget for one forecast computation
    pub forecast_timeout: Duration,

    /// Directory the CSV store reads from, checked by the readiness probe
    pub data_dir: PathBuf,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Result<Self, ConfigError> {
        let catalog = match &config.catalog {
            Some(path) => {
                tracing::info!(path = %path.display(), "loading catalog");
                Catalog::from_json_file(path)?
            }
            None => Catalog::builtin(),
        };
        let engine = EngineConfig::default();
        let market = engine.build_market(
            Arc::new(catalog),
            Arc::new(CsvSeriesStore::new(config.data_dir.clone())),
        )?;

        Ok(Self {
            market,
            default_months: engine.forecast.horizon,
            forecast_timeout: config.forecast_timeout,
            data_dir: config.data_dir.clone(),
        })
    }
}
