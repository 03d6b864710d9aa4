//! Domain error types surfaced to API consumers

use thiserror::Error;

use super::{SeriesError, TsError};

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, MarketError>;

/// Errors produced by the statistics, forecast and recommendation engines
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    /// Crop key is not present in the catalog
    #[error("Crop not found")]
    UnknownCrop(String),

    /// No series exists for the crop/location pair, default included
    #[error("Data not available for {crop} at {}", .location.as_deref().unwrap_or("default"))]
    DataUnavailable {
        crop: String,
        location: Option<String>,
    },

    /// Model fitting or prediction failed
    #[error("Forecast unavailable: {0}")]
    ForecastUnavailable(String),

    /// Trend denominator (preceding 6-month average) is zero
    #[error("Cannot compute trend: {0} is zero")]
    DivisionByZero(String),

    /// Fewer observations than a trailing-window computation needs
    #[error("Insufficient history: need at least {required} months, got {actual}")]
    InsufficientHistory { required: usize, actual: usize },

    /// The series has no observations at all
    #[error("Series has no observations")]
    EmptySeries,

    /// Invalid request parameter
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// The series store failed for a reason other than absence
    #[error("Series store error: {0}")]
    Store(#[from] SeriesError),
}

impl MarketError {
    /// Shorthand for [`MarketError::DataUnavailable`]
    pub fn data_unavailable(crop: &str, location: Option<&str>) -> Self {
        Self::DataUnavailable {
            crop: crop.to_string(),
            location: location.map(str::to_string),
        }
    }
}

impl From<TsError> for MarketError {
    fn from(err: TsError) -> Self {
        Self::ForecastUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_crop_message() {
        let error = MarketError::UnknownCrop("mango".to_string());
        assert_eq!(error.to_string(), "Crop not found");
    }

    #[test]
    fn test_data_unavailable_default_location() {
        let error = MarketError::data_unavailable("rice", None);
        assert_eq!(error.to_string(), "Data not available for rice at default");
    }

    #[test]
    fn test_data_unavailable_specific_location() {
        let error = MarketError::data_unavailable("rice", Some("dmart"));
        assert_eq!(error.to_string(), "Data not available for rice at dmart");
    }

    #[test]
    fn test_ts_error_becomes_forecast_unavailable() {
        let error: MarketError = TsError::InsufficientData {
            required: 8,
            actual: 2,
        }
        .into();
        assert!(matches!(error, MarketError::ForecastUnavailable(_)));
        assert!(error.to_string().contains("need at least 8 points"));
    }

    #[test]
    fn test_series_error_converts() {
        let error: MarketError = SeriesError::Io {
            path: "rice_prices.csv".to_string(),
            reason: "permission denied".to_string(),
        }
        .into();
        assert!(matches!(error, MarketError::Store(_)));
    }

    #[test]
    fn test_insufficient_history_message() {
        let error = MarketError::InsufficientHistory {
            required: 12,
            actual: 7,
        };
        assert_eq!(
            error.to_string(),
            "Insufficient history: need at least 12 months, got 7"
        );
    }

    #[test]
    fn test_all_variants_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MarketError>();
    }
}
