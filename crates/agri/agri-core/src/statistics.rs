//! Descriptive statistics over a price series

use agri_spi::{MarketError, PriceSeries, PriceSummary, Result};

/// Length of each trailing window compared by the trend
pub const TREND_WINDOW: usize = 6;
/// Observations needed for the trend: two adjacent windows
pub const TREND_HISTORY: usize = 2 * TREND_WINDOW;

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Percentage change of the last 6 months' mean over the 6 months before.
///
/// Rounded to 2 decimals. Fails with `InsufficientHistory` below 12
/// observations and `DivisionByZero` when the earlier window averages zero.
pub fn trend_percentage(prices: &[f64]) -> Result<f64> {
    let n = prices.len();
    if n < TREND_HISTORY {
        return Err(MarketError::InsufficientHistory {
            required: TREND_HISTORY,
            actual: n,
        });
    }

    let previous = mean(&prices[n - TREND_HISTORY..n - TREND_WINDOW]);
    let recent = mean(&prices[n - TREND_WINDOW..]);
    if previous == 0.0 {
        return Err(MarketError::DivisionByZero(
            "previous 6-month average".to_string(),
        ));
    }

    Ok(round2((recent - previous) / previous * 100.0))
}

/// Current, extreme and average prices plus the 6-month trend.
///
/// Ties for highest/lowest resolve to the earliest month. Series shorter
/// than 12 months get no trend rather than an error.
///
/// An empty series fails with `EmptySeries`: this layer has no crop or
/// location to name. [`CropMarket`](crate::market::CropMarket) never passes
/// one in; it reports `DataUnavailable` for the crop before summarizing.
pub fn summarize(series: &PriceSeries) -> Result<PriceSummary> {
    let points = series.points();
    let (first, rest) = points.split_first().ok_or(MarketError::EmptySeries)?;

    let mut highest = first;
    let mut lowest = first;
    for point in rest {
        if point.price > highest.price {
            highest = point;
        }
        if point.price < lowest.price {
            lowest = point;
        }
    }

    let prices = series.prices();
    let trend = match trend_percentage(&prices) {
        Ok(value) => Some(value),
        Err(MarketError::InsufficientHistory { .. }) => None,
        Err(err) => return Err(err),
    };

    let current = points[points.len() - 1];
    Ok(PriceSummary {
        current_price: current.price,
        highest_price: highest.price,
        lowest_price: lowest.price,
        avg_price: mean(&prices),
        highest_date: highest.month,
        lowest_date: lowest.month,
        trend_percentage: trend,
        historical_data: points.to_vec(),
    })
}
