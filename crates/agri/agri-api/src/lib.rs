//! Crop Price Consumer API
//!
//! Configuration types and builders for the crop price engine.
//!
//! This crate provides:
//! - [`ForecastConfig`] and [`RecommendationConfig`] with their defaults
//! - [`EngineConfig`] to assemble a [`CropMarket`]
//! - Re-exports from SPI and core for convenience

use std::sync::Arc;

// Re-export from core
pub use agri_core::{
    arima, catalog, confidence, forecast, market, recommendation, regression, statistics, store,
    Arima, Catalog, CropMarket, CsvSeriesStore, ForecastEngine, LinearTrend, MemorySeriesStore,
    RecommendationEngine,
};

// Re-export from SPI
pub use agri_spi::*;

use serde::{Deserialize, Serialize};

/// Configuration for the forecast engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Months forecast when the caller does not say
    pub horizon: usize,
    /// Confidence level (e.g., 0.95 for 95%)
    pub confidence_level: f64,
    /// ARIMA order (p, d, q)
    pub order: (usize, usize, usize),
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: agri_core::forecast::DEFAULT_HORIZON,
            confidence_level: 0.95,
            order: (1, 1, 1),
        }
    }
}

impl ForecastConfig {
    pub fn engine(&self) -> Result<ForecastEngine> {
        ForecastEngine::new(self.order, self.confidence_level)
    }
}

/// Configuration for crop ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationConfig {
    /// Months of history a crop needs before it is ranked
    pub min_history: usize,
    /// Trend a crop must exceed to be recommended
    pub min_trend_percentage: f64,
    /// Maximum crops returned
    pub max_results: usize,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            min_history: agri_core::statistics::TREND_HISTORY,
            min_trend_percentage: 5.0,
            max_results: 3,
        }
    }
}

impl RecommendationConfig {
    pub fn engine(&self) -> RecommendationEngine {
        RecommendationEngine::new(
            self.min_history,
            self.min_trend_percentage,
            self.max_results,
        )
    }
}

/// Full engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub forecast: ForecastConfig,
    pub recommendation: RecommendationConfig,
}

impl EngineConfig {
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Assemble a market service over `catalog` and `store`
    pub fn build_market(
        &self,
        catalog: Arc<Catalog>,
        store: Arc<dyn SeriesStore>,
    ) -> Result<CropMarket> {
        Ok(CropMarket::new(catalog, store)
            .with_forecaster(self.forecast.engine()?)
            .with_recommender(self.recommendation.engine()))
    }
}

/// Builder for [`EngineConfig`]
#[derive(Debug, Default)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn horizon(mut self, months: usize) -> Self {
        self.config.forecast.horizon = months;
        self
    }

    pub fn confidence_level(mut self, level: f64) -> Self {
        self.config.forecast.confidence_level = level;
        self
    }

    pub fn order(mut self, p: usize, d: usize, q: usize) -> Self {
        self.config.forecast.order = (p, d, q);
        self
    }

    pub fn min_history(mut self, months: usize) -> Self {
        self.config.recommendation.min_history = months;
        self
    }

    pub fn min_trend_percentage(mut self, pct: f64) -> Self {
        self.config.recommendation.min_trend_percentage = pct;
        self
    }

    pub fn max_results(mut self, n: usize) -> Self {
        self.config.recommendation.max_results = n;
        self
    }

    /// Build the configuration, validating the forecast horizon
    pub fn build(self) -> Result<EngineConfig> {
        let horizon = self.config.forecast.horizon;
        if horizon == 0 || horizon > agri_core::forecast::MAX_HORIZON {
            return Err(MarketError::InvalidParameter {
                name: "horizon".to_string(),
                reason: format!("must be between 1 and {}", agri_core::forecast::MAX_HORIZON),
            });
        }
        Ok(self.config)
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{EngineConfig, EngineConfigBuilder, ForecastConfig, RecommendationConfig};
    pub use agri_core::{
        Arima, Catalog, CropMarket, CsvSeriesStore, ForecastEngine, LinearTrend,
        MemorySeriesStore, RecommendationEngine,
    };
    pub use agri_spi::{
        Advice, Confidence, CropForecast, CropSummary, IntervalPredictor, LookupKey, MarketError,
        Month, Predictor, PriceSeries, Recommendations, Result, SeriesStore, TrendOutlook,
    };
}
