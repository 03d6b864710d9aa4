//! Crop Price Core
//!
//! Implementations behind the crop price service:
//!
//! - [`arima`]: ARIMA(p,d,q) model with prediction intervals
//! - [`regression`]: least-squares linear trend
//! - [`statistics`]: descriptive statistics and the 6-month trend
//! - [`forecast`]: forecast engine with per-step and overall advice
//! - [`recommendation`]: cross-location and cross-crop recommendations
//! - [`catalog`]: static crop/location registry
//! - [`store`]: CSV and in-memory series stores
//! - [`market`]: the request-scoped service tying them together

pub mod arima;
pub mod catalog;
pub mod confidence;
pub mod forecast;
pub mod market;
pub mod recommendation;
pub mod regression;
pub mod statistics;
pub mod store;

// Re-export SPI items for implementations
pub use agri_spi::{
    IntervalPredictor, LookupKey, MarketError, Predictor, PriceSeries, Result, SeriesError,
    SeriesStore, TsError, TsResult,
};

// Re-export main types
pub use arima::Arima;
pub use catalog::Catalog;
pub use forecast::ForecastEngine;
pub use market::CropMarket;
pub use recommendation::RecommendationEngine;
pub use regression::LinearTrend;
pub use store::{CsvSeriesStore, MemorySeriesStore};
