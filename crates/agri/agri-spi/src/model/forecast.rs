//! Forecast output model

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Month;

/// Categorical recommendation for a farmer holding produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Advice {
    #[serde(rename = "HOLD")]
    Hold,
    #[serde(rename = "SELL")]
    Sell,
    #[serde(rename = "SELL NOW")]
    SellNow,
    #[serde(rename = "SELL FAST")]
    SellFast,
    #[serde(rename = "MONITOR")]
    Monitor,
}

impl Advice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Advice::Hold => "HOLD",
            Advice::Sell => "SELL",
            Advice::SellNow => "SELL NOW",
            Advice::SellFast => "SELL FAST",
            Advice::Monitor => "MONITOR",
        }
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How much weight to put on a single forecast step's advice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Confidence::High => f.write_str("High"),
            Confidence::Medium => f.write_str("Medium"),
        }
    }
}

/// Overall direction of the forecast horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrendOutlook {
    #[serde(rename = "HOLD - Rapid upward trend expected")]
    RapidRise,
    #[serde(rename = "HOLD - Upward trend expected")]
    Rise,
    #[serde(rename = "SELL FAST - Steep downward trend expected")]
    SteepFall,
    #[serde(rename = "SELL FAST - Downward trend expected")]
    Fall,
    #[serde(rename = "MONITOR - Flat trend expected")]
    Flat,
}

impl TrendOutlook {
    /// Classify a per-step slope expressed as a percentage of the current price
    pub fn from_slope_pct(slope_pct: f64) -> Self {
        if slope_pct > 1.0 {
            TrendOutlook::RapidRise
        } else if slope_pct > 0.0 {
            TrendOutlook::Rise
        } else if slope_pct <= -1.0 {
            TrendOutlook::SteepFall
        } else if slope_pct < 0.0 {
            TrendOutlook::Fall
        } else {
            TrendOutlook::Flat
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrendOutlook::RapidRise => "HOLD - Rapid upward trend expected",
            TrendOutlook::Rise => "HOLD - Upward trend expected",
            TrendOutlook::SteepFall => "SELL FAST - Steep downward trend expected",
            TrendOutlook::Fall => "SELL FAST - Downward trend expected",
            TrendOutlook::Flat => "MONITOR - Flat trend expected",
        }
    }
}

impl fmt::Display for TrendOutlook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One forecast month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub month: Month,
    /// Predicted price
    pub price: f64,
    pub lower: f64,
    pub upper: f64,
    pub advice: Advice,
    pub reasoning: String,
    pub confidence: Confidence,
}

/// Full forecast for one crop series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastReport {
    pub current_price: f64,
    pub forecast_data: Vec<ForecastPoint>,
    pub overall_advice: TrendOutlook,
    pub avg_forecast_price: f64,
    pub forecast_trend_percentage: f64,
}

/// Forecast for one crop, labelled with catalog and location metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropForecast {
    pub crop_name: String,
    pub unit: String,
    pub location: Option<String>,
    pub location_label: String,
    pub months: usize,
    #[serde(flatten)]
    pub report: ForecastReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trend_outlook_boundaries() {
        assert_eq!(TrendOutlook::from_slope_pct(1.5), TrendOutlook::RapidRise);
        assert_eq!(TrendOutlook::from_slope_pct(1.0), TrendOutlook::Rise);
        assert_eq!(TrendOutlook::from_slope_pct(0.01), TrendOutlook::Rise);
        assert_eq!(TrendOutlook::from_slope_pct(0.0), TrendOutlook::Flat);
        assert_eq!(TrendOutlook::from_slope_pct(-0.5), TrendOutlook::Fall);
        assert_eq!(TrendOutlook::from_slope_pct(-1.0), TrendOutlook::SteepFall);
        assert_eq!(TrendOutlook::from_slope_pct(-3.0), TrendOutlook::SteepFall);
    }

    #[test]
    fn test_outlook_serializes_as_message() {
        let json = serde_json::to_string(&TrendOutlook::Flat).unwrap();
        assert_eq!(json, "\"MONITOR - Flat trend expected\"");
    }

    #[test]
    fn test_advice_serializes_with_spaces() {
        assert_eq!(serde_json::to_string(&Advice::SellFast).unwrap(), "\"SELL FAST\"");
        assert_eq!(Advice::SellNow.to_string(), "SELL NOW");
    }
}
