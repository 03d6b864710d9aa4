//! Crop Price Service Provider Interface
//!
//! Defines the domain model, contracts and error types shared by every
//! layer of the crop price engine:
//!
//! - [`PriceSeries`]: monthly, chronologically ordered price observations
//! - [`SeriesStore`]: where series come from, with an explicit fallback chain
//! - [`Predictor`] / [`IntervalPredictor`]: fit-predict models
//! - [`MarketError`], [`SeriesError`], [`TsError`]: error taxonomy

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{lookup_chain, IntervalPredictor, LookupKey, Predictor, SeriesStore};
pub use error::{CatalogError, MarketError, Result, SeriesError, TsError, TsResult};
pub use model::{
    Advice, BestLocation, Confidence, ConfidenceInterval, CropForecast, CropInfo, CropSummary,
    CropTrend, ForecastOutlook, ForecastPoint, ForecastReport, LocationInfo, LocationPrice, Month,
    PricePoint, PriceSeries, PriceSummary, Recommendations, TrendOutlook,
};
