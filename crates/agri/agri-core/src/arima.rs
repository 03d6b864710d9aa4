//! ARIMA (AutoRegressive Integrated Moving Average) implementation
//!
//! The model combines three components:
//!
//! - **AR (AutoRegressive)**: Uses past values to predict future values
//! - **I (Integrated)**: Differencing to remove trend
//! - **MA (Moving Average)**: Uses past forecast errors
//!
//! Coefficients are estimated by conditional sum of squares (CSS), starting
//! from Yule-Walker estimates and refined with a bounded pattern search.
//! The mean of the differenced series is kept as a drift term, so a series
//! that rises steadily keeps rising in the forecast.
//!
//! Prediction intervals come from the psi-weight (MA(∞)) representation of
//! the fitted model, integrated `d` times.
//!
//! ## Example
//!
//! ```rust
//! use agri_core::{Arima, Predictor};
//!
//! let data: Vec<f64> = (1..=20).map(|x| x as f64).collect();
//! let mut model = Arima::new(1, 1, 1).unwrap();
//! model.fit(&data).unwrap();
//! let forecast = model.predict(3).unwrap();
//! assert_eq!(forecast.len(), 3);
//! ```

use agri_spi::{ConfidenceInterval, IntervalPredictor, Predictor, TsError, TsResult};

use crate::confidence::interval_from_standard_errors;

/// Coefficients are kept strictly inside the unit interval
const COEFF_BOUND: f64 = 0.99;
/// Initial pattern search step
const INITIAL_STEP: f64 = 0.1;
/// Pattern search stops once the step shrinks below this
const STEP_TOLERANCE: f64 = 1e-4;
const MAX_ITERATIONS: usize = 5_000;

/// ARIMA model for time series forecasting
#[derive(Debug, Clone)]
pub struct Arima {
    /// AR order (p)
    p: usize,
    /// Differencing order (d)
    d: usize,
    /// MA order (q)
    q: usize,
    ar_coeffs: Vec<f64>,
    ma_coeffs: Vec<f64>,
    /// Mean of the differenced series (drift)
    constant: f64,
    /// Last value at each differencing level, level 0 first
    level_tails: Vec<f64>,
    /// Differenced series with the drift removed
    centered: Vec<f64>,
    /// In-sample one-step errors on the centered scale
    residuals: Vec<f64>,
    /// Innovation variance
    sigma2: f64,
    fitted: bool,
}

impl Arima {
    /// Create a new ARIMA model with specified orders
    ///
    /// # Arguments
    ///
    /// * `p` - Order of autoregressive component (0-10)
    /// * `d` - Degree of differencing (0-2)
    /// * `q` - Order of moving average component (0-10)
    pub fn new(p: usize, d: usize, q: usize) -> TsResult<Self> {
        if p > 10 {
            return Err(TsError::InvalidParameter {
                name: "p".to_string(),
                reason: "AR order must be <= 10".to_string(),
            });
        }
        if d > 2 {
            return Err(TsError::InvalidParameter {
                name: "d".to_string(),
                reason: "Differencing order must be <= 2".to_string(),
            });
        }
        if q > 10 {
            return Err(TsError::InvalidParameter {
                name: "q".to_string(),
                reason: "MA order must be <= 10".to_string(),
            });
        }

        Ok(Self {
            p,
            d,
            q,
            ar_coeffs: vec![0.0; p],
            ma_coeffs: vec![0.0; q],
            constant: 0.0,
            level_tails: Vec::new(),
            centered: Vec::new(),
            residuals: Vec::new(),
            sigma2: 0.0,
            fitted: false,
        })
    }

    /// Minimum observations needed to fit this model
    pub fn min_observations(&self) -> usize {
        self.p + self.d + self.q + 5
    }

    /// Apply differencing once per order
    fn difference(data: &[f64]) -> Vec<f64> {
        data.windows(2).map(|w| w[1] - w[0]).collect()
    }

    /// Reverse differencing, integrating from the stored level tails
    fn undifference(&self, forecasts: &[f64]) -> Vec<f64> {
        let mut result = forecasts.to_vec();
        for &tail in self.level_tails.iter().rev() {
            let mut running = tail;
            for value in result.iter_mut() {
                running += *value;
                *value = running;
            }
        }
        result
    }

    /// Estimate AR coefficients using Yule-Walker equations
    fn estimate_ar_coefficients(&self, data: &[f64]) -> Vec<f64> {
        if self.p == 0 {
            return Vec::new();
        }

        let n = data.len();
        let mut autocorr = vec![0.0; self.p + 1];
        for (k, slot) in autocorr.iter_mut().enumerate() {
            let sum: f64 = (k..n).map(|i| data[i] * data[i - k]).sum();
            *slot = sum / n as f64;
        }

        // Levinson-Durbin recursion
        let mut coeffs = vec![0.0; self.p];
        if autocorr[0].abs() > 1e-10 {
            coeffs[0] = autocorr[1] / autocorr[0];

            for k in 1..self.p {
                let mut sum = autocorr[k + 1];
                for j in 0..k {
                    sum -= coeffs[j] * autocorr[k - j];
                }

                let mut denom = autocorr[0];
                for j in 0..k {
                    denom -= coeffs[j] * autocorr[j + 1];
                }

                if denom.abs() > 1e-10 {
                    let new_coeff = sum / denom;
                    let old_coeffs = coeffs.clone();
                    coeffs[k] = new_coeff;
                    for j in 0..k {
                        coeffs[j] = old_coeffs[j] - new_coeff * old_coeffs[k - 1 - j];
                    }
                }
            }
        }

        coeffs
            .into_iter()
            .map(|c| c.clamp(-COEFF_BOUND, COEFF_BOUND))
            .collect()
    }

    /// Starting MA coefficients from the residual autocorrelation
    fn estimate_ma_coefficients(&self, residuals: &[f64]) -> Vec<f64> {
        if self.q == 0 || residuals.is_empty() {
            return vec![0.0; self.q];
        }

        let n = residuals.len();
        let mean: f64 = residuals.iter().sum::<f64>() / n as f64;
        let centered: Vec<f64> = residuals.iter().map(|x| x - mean).collect();

        let mut coeffs = vec![0.0; self.q];
        let var: f64 = centered.iter().map(|x| x * x).sum::<f64>() / n as f64;

        if var.abs() > 1e-10 {
            for (k, coeff) in coeffs.iter_mut().enumerate() {
                let sum: f64 = ((k + 1)..n).map(|i| centered[i] * centered[i - k - 1]).sum();
                *coeff = ((sum / n as f64) / var).clamp(-COEFF_BOUND, COEFF_BOUND);
            }
        }

        coeffs
    }

    /// One-step errors given coefficients; the first `p` are fixed at zero
    fn css_residuals(&self, data: &[f64], ar: &[f64], ma: &[f64]) -> Vec<f64> {
        let mut errors = vec![0.0; data.len()];
        for t in self.p..data.len() {
            let mut prediction = 0.0;
            for (j, phi) in ar.iter().enumerate() {
                prediction += phi * data[t - j - 1];
            }
            for (j, theta) in ma.iter().enumerate() {
                if t > j {
                    prediction += theta * errors[t - j - 1];
                }
            }
            errors[t] = data[t] - prediction;
        }
        errors
    }

    fn css(&self, data: &[f64], params: &[f64]) -> f64 {
        let (ar, ma) = params.split_at(self.p);
        self.css_residuals(data, ar, ma)[self.p..]
            .iter()
            .map(|e| e * e)
            .sum()
    }

    /// Minimise the conditional sum of squares by coordinate pattern search
    fn refine(&self, data: &[f64], initial: Vec<f64>) -> TsResult<Vec<f64>> {
        let mut params = initial;
        if params.is_empty() {
            return Ok(params);
        }

        let mut best = self.css(data, &params);
        let mut step = INITIAL_STEP;
        let mut iterations = 0;

        while step > STEP_TOLERANCE {
            iterations += 1;
            if iterations > MAX_ITERATIONS {
                return Err(TsError::ConvergenceFailure {
                    iterations: MAX_ITERATIONS,
                });
            }

            let mut improved = false;
            for i in 0..params.len() {
                for direction in [1.0, -1.0] {
                    let mut candidate = params.clone();
                    candidate[i] = (candidate[i] + direction * step).clamp(-COEFF_BOUND, COEFF_BOUND);
                    let value = self.css(data, &candidate);
                    if value < best {
                        best = value;
                        params = candidate;
                        improved = true;
                    }
                }
            }

            if !improved {
                step /= 2.0;
            }
        }

        Ok(params)
    }

    /// Psi weights of the integrated model, `Psi_0 = 1`
    fn psi_weights(&self, steps: usize) -> Vec<f64> {
        let mut psi = vec![0.0; steps];
        if steps == 0 {
            return psi;
        }
        psi[0] = 1.0;
        for j in 1..steps {
            let mut value = if j <= self.q { self.ma_coeffs[j - 1] } else { 0.0 };
            for i in 1..=self.p.min(j) {
                value += self.ar_coeffs[i - 1] * psi[j - i];
            }
            psi[j] = value;
        }

        for _ in 0..self.d {
            let mut running = 0.0;
            for value in psi.iter_mut() {
                running += *value;
                *value = running;
            }
        }
        psi
    }

    /// Standard error of the forecast at each horizon
    pub fn standard_errors(&self, steps: usize) -> TsResult<Vec<f64>> {
        if !self.fitted {
            return Err(TsError::NotFitted);
        }
        let mut cumulative = 0.0;
        Ok(self
            .psi_weights(steps)
            .into_iter()
            .map(|psi| {
                cumulative += psi * psi;
                (self.sigma2 * cumulative).sqrt()
            })
            .collect())
    }

    /// Get model parameters
    pub fn params(&self) -> (usize, usize, usize) {
        (self.p, self.d, self.q)
    }

    /// Get AR coefficients
    pub fn ar_coefficients(&self) -> &[f64] {
        &self.ar_coeffs
    }

    /// Get MA coefficients
    pub fn ma_coefficients(&self) -> &[f64] {
        &self.ma_coeffs
    }

    /// Innovation variance estimated from the CSS residuals
    pub fn sigma2(&self) -> f64 {
        self.sigma2
    }
}

impl Predictor for Arima {
    fn fit(&mut self, data: &[f64]) -> TsResult<()> {
        let min_required = self.min_observations();
        if data.len() < min_required {
            return Err(TsError::InsufficientData {
                required: min_required,
                actual: data.len(),
            });
        }

        if data.iter().any(|x| x.is_nan() || x.is_infinite()) {
            return Err(TsError::InvalidData(
                "Data contains NaN or infinite values".to_string(),
            ));
        }

        let mut level_tails = Vec::with_capacity(self.d);
        let mut differenced = data.to_vec();
        for _ in 0..self.d {
            level_tails.push(differenced[differenced.len() - 1]);
            differenced = Self::difference(&differenced);
        }

        let n = differenced.len();
        let constant = differenced.iter().sum::<f64>() / n as f64;
        let centered: Vec<f64> = differenced.iter().map(|x| x - constant).collect();

        let ar_start = self.estimate_ar_coefficients(&centered);
        let ar_residuals = self.css_residuals(&centered, &ar_start, &[]);
        let ma_start = self.estimate_ma_coefficients(&ar_residuals[self.p..]);

        let mut initial = ar_start;
        initial.extend(ma_start);
        let params = self.refine(&centered, initial)?;
        let (ar, ma) = params.split_at(self.p);

        let residuals = self.css_residuals(&centered, ar, ma);
        let effective = n - self.p;
        let sigma2 = residuals[self.p..].iter().map(|e| e * e).sum::<f64>() / effective as f64;
        if !sigma2.is_finite() {
            return Err(TsError::NumericalError(
                "Residual variance is not finite".to_string(),
            ));
        }

        self.ar_coeffs = ar.to_vec();
        self.ma_coeffs = ma.to_vec();
        self.constant = constant;
        self.level_tails = level_tails;
        self.centered = centered;
        self.residuals = residuals;
        self.sigma2 = sigma2;
        self.fitted = true;
        Ok(())
    }

    fn predict(&self, steps: usize) -> TsResult<Vec<f64>> {
        if !self.fitted {
            return Err(TsError::NotFitted);
        }

        if steps == 0 {
            return Ok(Vec::new());
        }

        let n = self.centered.len();
        let mut extended = self.centered.clone();
        let mut extended_residuals = self.residuals.clone();

        for _ in 0..steps {
            let mut forecast = 0.0;

            // AR component
            for j in 0..self.p {
                let idx = extended.len() - j - 1;
                forecast += self.ar_coeffs[j] * extended[idx];
            }

            // MA component
            for j in 0..self.q {
                if extended_residuals.len() > j {
                    let idx = extended_residuals.len() - j - 1;
                    forecast += self.ma_coeffs[j] * extended_residuals[idx];
                }
            }

            extended.push(forecast);
            extended_residuals.push(0.0); // Future residuals are 0
        }

        let forecasts: Vec<f64> = extended[n..].iter().map(|w| w + self.constant).collect();
        Ok(self.undifference(&forecasts))
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }
}

impl IntervalPredictor for Arima {
    fn predict_interval(&self, steps: usize, confidence_level: f64) -> TsResult<ConfidenceInterval> {
        let forecast = self.predict(steps)?;
        let std_errors = self.standard_errors(steps)?;
        Ok(interval_from_standard_errors(forecast, &std_errors, confidence_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noisy_trend() -> Vec<f64> {
        (0..36)
            .map(|i| 40.0 + i as f64 * 0.8 + (i as f64 * 1.3).sin() * 2.5)
            .collect()
    }

    #[test]
    fn test_arima_creation() {
        assert!(Arima::new(1, 1, 1).is_ok());
        assert!(Arima::new(11, 0, 0).is_err());
        assert!(Arima::new(1, 3, 1).is_err());
    }

    #[test]
    fn test_insufficient_data() {
        let mut model = Arima::new(1, 1, 1).unwrap();
        let result = model.fit(&[1.0, 2.0, 3.0]);
        assert_eq!(
            result,
            Err(TsError::InsufficientData {
                required: 8,
                actual: 3
            })
        );
        assert!(!model.is_fitted());
    }

    #[test]
    fn test_predict_before_fit() {
        let model = Arima::new(1, 1, 1).unwrap();
        assert_eq!(model.predict(3), Err(TsError::NotFitted));
    }

    #[test]
    fn test_rejects_nan() {
        let mut data = noisy_trend();
        data[5] = f64::NAN;
        let mut model = Arima::new(1, 1, 1).unwrap();
        assert!(matches!(model.fit(&data), Err(TsError::InvalidData(_))));
    }

    #[test]
    fn test_constant_series_stays_flat() {
        let data = vec![42.5; 12];
        let mut model = Arima::new(1, 1, 1).unwrap();
        model.fit(&data).unwrap();

        let interval = model.predict_interval(6, 0.95).unwrap();
        assert!(interval.forecast.iter().all(|&f| f == 42.5));
        assert!(interval.lower.iter().all(|&l| l == 42.5));
        assert!(interval.upper.iter().all(|&u| u == 42.5));
    }

    #[test]
    fn test_linear_series_continues_trend() {
        let data: Vec<f64> = (100..112).map(|x| x as f64).collect();
        let mut model = Arima::new(1, 1, 1).unwrap();
        model.fit(&data).unwrap();

        let forecast = model.predict(3).unwrap();
        assert_eq!(forecast, vec![112.0, 113.0, 114.0]);
    }

    #[test]
    fn test_coefficients_are_bounded() {
        let mut model = Arima::new(1, 1, 1).unwrap();
        model.fit(&noisy_trend()).unwrap();
        assert!(model.ar_coefficients()[0].abs() <= COEFF_BOUND);
        assert!(model.ma_coefficients()[0].abs() <= COEFF_BOUND);
        assert!(model.sigma2() > 0.0);
    }

    #[test]
    fn test_interval_contains_forecast_and_widens() {
        let mut model = Arima::new(1, 1, 1).unwrap();
        model.fit(&noisy_trend()).unwrap();
        let interval = model.predict_interval(6, 0.95).unwrap();

        assert_eq!(interval.len(), 6);
        for i in 0..6 {
            assert!(interval.lower[i] <= interval.forecast[i]);
            assert!(interval.forecast[i] <= interval.upper[i]);
        }
        let first = interval.upper[0] - interval.lower[0];
        let last = interval.upper[5] - interval.lower[5];
        assert!(last > first);
    }

    #[test]
    fn test_second_order_differencing_extends_quadratic() {
        let data: Vec<f64> = (0..15).map(|i| (i * i) as f64).collect();
        let mut model = Arima::new(0, 2, 0).unwrap();
        model.fit(&data).unwrap();
        let forecast = model.predict(2).unwrap();
        assert!((forecast[0] - 225.0).abs() < 1e-9);
        assert!((forecast[1] - 256.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_steps() {
        let mut model = Arima::new(1, 1, 1).unwrap();
        model.fit(&noisy_trend()).unwrap();
        assert!(model.predict(0).unwrap().is_empty());
    }
}
