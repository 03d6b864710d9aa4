//! Recommendation aggregator output

use serde::{Deserialize, Serialize};

use super::TrendOutlook;

/// Current price of a crop at one location, or at the default market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationPrice {
    /// `None` for the location-agnostic default series
    pub location: Option<String>,
    pub location_label: String,
    pub price: f64,
}

/// Where a crop currently sells for the most
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestLocation {
    pub crop: String,
    pub best: LocationPrice,
    pub all_locations: Vec<LocationPrice>,
}

/// A crop ranked by its recent trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropTrend {
    pub crop: String,
    pub crop_name: String,
    pub unit: String,
    pub trend_percentage: f64,
    pub current_price: f64,
}

/// Headline of a crop forecast, embedded in recommendations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastOutlook {
    pub crop: String,
    pub months: usize,
    pub overall_advice: TrendOutlook,
    pub avg_forecast_price: f64,
    pub forecast_trend_percentage: f64,
}

/// Combined answer to a recommendation query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendations {
    pub location: Option<String>,
    pub location_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_location_to_sell: Option<BestLocation>,
    pub best_crops_to_grow: Vec<CropTrend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forecast_outlook: Option<ForecastOutlook>,
}
