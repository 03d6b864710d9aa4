//! Descriptive statistics output

use serde::{Deserialize, Serialize};

use super::{Month, PricePoint};

/// Descriptive statistics over one price series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSummary {
    pub current_price: f64,
    pub highest_price: f64,
    pub lowest_price: f64,
    pub avg_price: f64,
    pub highest_date: Month,
    pub lowest_date: Month,
    /// Recent vs preceding 6-month average, `None` below 12 observations
    pub trend_percentage: Option<f64>,
    pub historical_data: Vec<PricePoint>,
}

/// Statistics for one crop, labelled with catalog and location metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropSummary {
    pub crop_name: String,
    pub unit: String,
    pub location: Option<String>,
    pub location_label: String,
    #[serde(flatten)]
    pub summary: PriceSummary,
}
