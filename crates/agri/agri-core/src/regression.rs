//! Linear trend for time series
//!
//! Uses ordinary least squares (OLS) to fit `y = intercept + slope * t`
//! where `t` is the step index `0, 1, 2, ...`.

use agri_spi::{Predictor, TsError, TsResult};

/// Least-squares slope of `values` against their index.
///
/// Deviations are taken from the first value rather than the mean, which
/// leaves the slope unchanged but makes an exactly constant input give an
/// exactly zero slope. `None` below two points.
pub fn least_squares_slope(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let t_mean = (n - 1.0) / 2.0;
    let anchor = values[0];

    let mut numerator = 0.0;
    let mut denominator = 0.0;
    for (i, &y) in values.iter().enumerate() {
        let dt = i as f64 - t_mean;
        numerator += dt * (y - anchor);
        denominator += dt * dt;
    }
    Some(numerator / denominator)
}

/// Linear trend model for time series
///
/// # Example
///
/// ```rust
/// use agri_core::{LinearTrend, Predictor};
///
/// let data = vec![10.0, 12.0, 14.0, 16.0, 18.0, 20.0];
/// let mut model = LinearTrend::new();
/// model.fit(&data).unwrap();
///
/// let forecast = model.predict(3).unwrap();
/// assert!((forecast[0] - 22.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LinearTrend {
    intercept: f64,
    slope: f64,
    n_observations: usize,
    fitted: bool,
}

impl LinearTrend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trend per time step
    pub fn slope(&self) -> f64 {
        self.slope
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Predict value at a specific time index
    pub fn predict_at(&self, t: f64) -> TsResult<f64> {
        if !self.fitted {
            return Err(TsError::NotFitted);
        }
        Ok(self.intercept + self.slope * t)
    }
}

impl Predictor for LinearTrend {
    fn fit(&mut self, data: &[f64]) -> TsResult<()> {
        let slope = least_squares_slope(data).ok_or(TsError::InsufficientData {
            required: 2,
            actual: data.len(),
        })?;
        if !slope.is_finite() {
            return Err(TsError::NumericalError(
                "Slope is not finite".to_string(),
            ));
        }

        let n = data.len() as f64;
        let t_mean = (n - 1.0) / 2.0;
        let y_mean = data.iter().sum::<f64>() / n;

        self.slope = slope;
        self.intercept = y_mean - slope * t_mean;
        self.n_observations = data.len();
        self.fitted = true;
        Ok(())
    }

    fn predict(&self, steps: usize) -> TsResult<Vec<f64>> {
        if !self.fitted {
            return Err(TsError::NotFitted);
        }
        (0..steps)
            .map(|h| self.predict_at((self.n_observations + h) as f64))
            .collect()
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}
