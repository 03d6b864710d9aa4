//! Monthly price series

use serde::{Deserialize, Serialize};

use super::Month;
use crate::error::SeriesError;

/// One monthly price observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub month: Month,
    pub price: f64,
}

impl PricePoint {
    pub fn new(month: Month, price: f64) -> Self {
        Self { month, price }
    }
}

/// Chronologically ordered monthly price observations for one crop,
/// optionally scoped to one location.
///
/// Months are strictly increasing and prices are finite and non-negative.
/// An empty series is representable; engines reject it where they need data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series, validating ordering and prices
    pub fn new(points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        for (row, point) in points.iter().enumerate() {
            if !point.price.is_finite() || point.price < 0.0 {
                return Err(SeriesError::InvalidRow {
                    row,
                    reason: format!("price {} is not a non-negative number", point.price),
                });
            }
        }
        if let Some(pair) = points.windows(2).find(|w| w[1].month <= w[0].month) {
            return Err(SeriesError::OutOfOrder {
                month: pair[1].month.to_string(),
            });
        }
        Ok(Self { points })
    }

    /// Consecutive months starting at `start`, one per price
    pub fn from_prices(start: Month, prices: &[f64]) -> Result<Self, SeriesError> {
        let mut months = Vec::with_capacity(prices.len());
        if !prices.is_empty() {
            months.push(start);
            months.extend(start.following(prices.len() - 1));
        }
        let points = months
            .into_iter()
            .zip(prices.iter())
            .map(|(month, &price)| PricePoint::new(month, price))
            .collect();
        Self::new(points)
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Prices in chronological order
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most recent observation
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Price of the most recent observation
    pub fn current_price(&self) -> Option<f64> {
        self.last().map(|p| p.price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan(year: i32) -> Month {
        Month::new(year, 1).unwrap()
    }

    #[test]
    fn test_from_prices_assigns_consecutive_months() {
        let series = PriceSeries::from_prices(jan(2024), &[10.0, 11.0, 12.0]).unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.points()[2].month, Month::new(2024, 3).unwrap());
        assert_eq!(series.current_price(), Some(12.0));
    }

    #[test]
    fn test_empty_series() {
        let series = PriceSeries::from_prices(jan(2024), &[]).unwrap();
        assert!(series.is_empty());
        assert_eq!(series.current_price(), None);
    }

    #[test]
    fn test_rejects_negative_price() {
        let result = PriceSeries::from_prices(jan(2024), &[10.0, -1.0]);
        assert!(matches!(result, Err(SeriesError::InvalidRow { row: 1, .. })));
    }

    #[test]
    fn test_rejects_nan_price() {
        let result = PriceSeries::from_prices(jan(2024), &[f64::NAN]);
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_duplicate_month() {
        let points = vec![
            PricePoint::new(jan(2024), 1.0),
            PricePoint::new(jan(2024), 2.0),
        ];
        assert!(matches!(
            PriceSeries::new(points),
            Err(SeriesError::OutOfOrder { .. })
        ));
    }
}
