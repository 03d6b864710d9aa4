//! Forecast engine
//!
//! Fits an ARIMA model to a monthly price series, projects it forward with
//! prediction intervals, and attaches rule-based advice to each month and
//! to the horizon as a whole.

use agri_spi::{
    Advice, Confidence, ForecastPoint, ForecastReport, IntervalPredictor, MarketError, Predictor,
    PriceSeries, Result, TrendOutlook, TsError,
};

use crate::arima::Arima;
use crate::regression::LinearTrend;
use crate::statistics::{mean, round2};

/// Default forecast horizon in months
pub const DEFAULT_HORIZON: usize = 6;
/// Longest accepted horizon in months
pub const MAX_HORIZON: usize = 60;
/// Month-over-month rise (in percent) that counts as a strong move
const STRONG_MOVE_PCT: f64 = 1.0;

/// Advice for one forecast step
#[derive(Debug, Clone, PartialEq)]
pub struct StepAdvice {
    pub advice: Advice,
    pub reasoning: String,
    pub confidence: Confidence,
}

/// Classify the move from `previous` to `price`.
///
/// Confidence is `High` only when the absolute move exceeds 1.5; both the
/// small-move band and the 0.5..=1.5 band are `Medium`.
pub fn step_advice(previous: f64, price: f64) -> StepAdvice {
    let delta = price - previous;

    let (advice, reasoning) = if delta > 0.0 {
        let delta_pct = delta / previous * 100.0;
        if delta_pct > STRONG_MOVE_PCT {
            (
                Advice::Hold,
                format!(
                    "Strong upward move expected ({delta_pct:+.2}% month over month). Hold your produce for a better price."
                ),
            )
        } else {
            (
                Advice::Hold,
                format!(
                    "Upward movement expected ({delta_pct:+.2}% month over month). Holding may fetch a slightly better price."
                ),
            )
        }
    } else if delta < 0.0 {
        (
            Advice::SellFast,
            "Downward movement expected. Sell soon before prices fall further.".to_string(),
        )
    } else {
        (
            Advice::Monitor,
            "Flat outlook. Monitor the market before deciding.".to_string(),
        )
    };

    let magnitude = delta.abs();
    let confidence = if magnitude < 0.5 {
        Confidence::Medium
    } else if magnitude > 1.5 {
        Confidence::High
    } else {
        Confidence::Medium
    };

    StepAdvice {
        advice,
        reasoning,
        confidence,
    }
}

/// Denominator for percentages of the current price, floored at 1.0
fn price_base(current: f64) -> f64 {
    if current.abs() < 1.0 {
        1.0
    } else {
        current
    }
}

/// Forecast engine over ARIMA(p,d,q), ARIMA(1,1,1) by default
#[derive(Debug, Clone)]
pub struct ForecastEngine {
    order: (usize, usize, usize),
    confidence_level: f64,
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self {
            order: (1, 1, 1),
            confidence_level: 0.95,
        }
    }
}

impl ForecastEngine {
    pub fn new(order: (usize, usize, usize), confidence_level: f64) -> Result<Self> {
        if !(confidence_level > 0.0 && confidence_level < 1.0) {
            return Err(MarketError::InvalidParameter {
                name: "confidence_level".to_string(),
                reason: "must be between 0 and 1".to_string(),
            });
        }
        let (p, d, q) = order;
        Arima::new(p, d, q)?;
        Ok(Self {
            order,
            confidence_level,
        })
    }

    pub fn order(&self) -> (usize, usize, usize) {
        self.order
    }

    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Forecast `months` consecutive months after the series' last month
    pub fn forecast(&self, series: &PriceSeries, months: usize) -> Result<ForecastReport> {
        if months == 0 || months > MAX_HORIZON {
            return Err(MarketError::InvalidParameter {
                name: "months".to_string(),
                reason: format!("must be between 1 and {MAX_HORIZON}"),
            });
        }
        let last = series.last().ok_or(MarketError::EmptySeries)?;
        let current_price = last.price;

        let (p, d, q) = self.order;
        let mut model = Arima::new(p, d, q)?;
        model.fit(&series.prices())?;
        let interval = model.predict_interval(months, self.confidence_level)?;

        let future = last.month.following(months);
        if future.len() != months {
            return Err(MarketError::ForecastUnavailable(
                "forecast horizon runs past the supported calendar".to_string(),
            ));
        }

        let mut forecast_data = Vec::with_capacity(months);
        let mut previous = current_price;
        for (i, month) in future.into_iter().enumerate() {
            let price = interval.forecast[i];
            let step = step_advice(previous, price);
            forecast_data.push(ForecastPoint {
                month,
                price,
                lower: interval.lower[i],
                upper: interval.upper[i],
                advice: step.advice,
                reasoning: step.reasoning,
                confidence: step.confidence,
            });
            previous = price;
        }

        let overall_advice = overall_outlook(&interval.forecast, current_price)?;
        let avg_forecast_price = mean(&interval.forecast);
        let forecast_trend_percentage =
            round2((avg_forecast_price - current_price) / price_base(current_price) * 100.0);

        Ok(ForecastReport {
            current_price,
            forecast_data,
            overall_advice,
            avg_forecast_price,
            forecast_trend_percentage,
        })
    }
}

/// Classify the least-squares slope of the forecast path.
///
/// The slope is expressed per step as a percentage of the current price.
/// A single-step path has no slope and reads as flat.
pub fn overall_outlook(forecast: &[f64], current_price: f64) -> Result<TrendOutlook> {
    let mut trend = LinearTrend::new();
    let slope = match trend.fit(forecast) {
        Ok(()) => trend.slope(),
        Err(TsError::InsufficientData { .. }) => 0.0,
        Err(err) => return Err(err.into()),
    };
    let slope_pct = slope / price_base(current_price) * 100.0;
    Ok(TrendOutlook::from_slope_pct(slope_pct))
}
