//! Crop Price Facade
//!
//! High-level API for crop price statistics, forecasts and recommendations.
//! Re-exports all public types from the stack for convenient usage.

// Re-export everything from API (which includes SPI and core)
pub use agri_api::*;

// Explicit re-exports for documentation
pub use agri_api::prelude;

// Re-export core modules for direct access
pub use agri_core::{
    arima, catalog, confidence, forecast, market, recommendation, regression, statistics, store,
};

// Re-export SPI contracts and errors
pub use agri_spi::{
    CatalogError, IntervalPredictor, LookupKey, MarketError, Predictor, SeriesError, SeriesStore,
    TsError,
};
