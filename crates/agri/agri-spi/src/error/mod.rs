//! Error types for the crop price engine
//!
//! - [`TsError`]: model fitting and prediction failures
//! - [`SeriesError`]: series store failures
//! - [`MarketError`]: domain failures surfaced to API consumers
//! - [`CatalogError`]: crop/location registry loading failures

mod catalog_error;
mod market_error;
mod series_error;
mod ts_error;

pub use catalog_error::CatalogError;
pub use market_error::{MarketError, Result};
pub use series_error::SeriesError;
pub use ts_error::{TsError, TsResult};
