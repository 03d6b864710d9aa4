//! Confidence interval construction
//!
//! Turns point forecasts and per-step standard errors into symmetric
//! normal-approximation prediction intervals.

use agri_spi::ConfidenceInterval;

/// Build an interval as `forecast ± z * se` for each step
pub fn interval_from_standard_errors(
    forecast: Vec<f64>,
    std_errors: &[f64],
    confidence_level: f64,
) -> ConfidenceInterval {
    let z = z_score(confidence_level);

    let lower = forecast
        .iter()
        .zip(std_errors.iter())
        .map(|(&f, &se)| f - z * se)
        .collect();

    let upper = forecast
        .iter()
        .zip(std_errors.iter())
        .map(|(&f, &se)| f + z * se)
        .collect();

    ConfidenceInterval {
        forecast,
        lower,
        upper,
        confidence_level,
    }
}

/// Get z-score for a given confidence level
pub fn z_score(confidence_level: f64) -> f64 {
    match confidence_level {
        x if x >= 0.99 => 2.576,
        x if x >= 0.95 => 1.96,
        x if x >= 0.90 => 1.645,
        x if x >= 0.80 => 1.282,
        _ => 1.96, // default to 95%
    }
}
