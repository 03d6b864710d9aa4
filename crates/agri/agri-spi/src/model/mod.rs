//! Domain model types

mod catalog;
mod confidence_interval;
mod forecast;
mod month;
mod recommendation;
mod series;
mod summary;

pub use catalog::{CropInfo, LocationInfo};
pub use confidence_interval::ConfidenceInterval;
pub use forecast::{Advice, Confidence, CropForecast, ForecastPoint, ForecastReport, TrendOutlook};
pub use month::Month;
pub use recommendation::{BestLocation, CropTrend, ForecastOutlook, LocationPrice, Recommendations};
pub use series::{PricePoint, PriceSeries};
pub use summary::{CropSummary, PriceSummary};
