//! Predictor traits for forecasting models

use crate::error::TsResult;
use crate::model::ConfidenceInterval;

/// Common trait for all time series predictors
///
/// Follows the fit-predict pattern: a model is fitted once to a historical
/// series and then asked for any number of future steps.
///
/// # Example
///
/// ```rust,ignore
/// use agri_spi::Predictor;
///
/// fn forecast<P: Predictor>(predictor: &mut P, data: &[f64], horizon: usize) -> agri_spi::TsResult<Vec<f64>> {
///     predictor.fit(data)?;
///     predictor.predict(horizon)
/// }
/// ```
pub trait Predictor {
    /// Fit the model to historical data
    fn fit(&mut self, data: &[f64]) -> TsResult<()>;

    /// Predict `steps` future values
    fn predict(&self, steps: usize) -> TsResult<Vec<f64>>;

    /// Check if the model has been fitted
    fn is_fitted(&self) -> bool;
}

/// Predictors that can also quantify their own uncertainty
pub trait IntervalPredictor: Predictor {
    /// Point forecasts with `lower <= forecast <= upper` at every step
    fn predict_interval(&self, steps: usize, confidence_level: f64)
        -> TsResult<ConfidenceInterval>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TsError;

    /// Forecasts the last observed value forever
    struct NaivePredictor {
        last: Option<f64>,
    }

    impl Predictor for NaivePredictor {
        fn fit(&mut self, data: &[f64]) -> TsResult<()> {
            match data.last() {
                Some(&value) => {
                    self.last = Some(value);
                    Ok(())
                }
                None => Err(TsError::InsufficientData {
                    required: 1,
                    actual: 0,
                }),
            }
        }

        fn predict(&self, steps: usize) -> TsResult<Vec<f64>> {
            self.last
                .map(|value| vec![value; steps])
                .ok_or(TsError::NotFitted)
        }

        fn is_fitted(&self) -> bool {
            self.last.is_some()
        }
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let model = NaivePredictor { last: None };
        assert_eq!(model.predict(3), Err(TsError::NotFitted));
    }

    #[test]
    fn test_generic_fit_predict() {
        fn run<P: Predictor>(p: &mut P) -> TsResult<Vec<f64>> {
            p.fit(&[1.0, 2.0, 3.0])?;
            p.predict(2)
        }
        let mut model = NaivePredictor { last: None };
        assert_eq!(run(&mut model).unwrap(), vec![3.0, 3.0]);
        assert!(model.is_fitted());
    }
}
