//! Integration tests for the crop price engines

use agri_facade::forecast::step_advice;
use agri_facade::prelude::*;
use agri_facade::statistics::{summarize, trend_percentage};

fn series(prices: &[f64]) -> PriceSeries {
    PriceSeries::from_prices(Month::new(2022, 6).unwrap(), prices).unwrap()
}

fn seasonal(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 25.0 + 8.0 * (i as f64 * std::f64::consts::PI / 6.0).sin() + i as f64 * 0.2)
        .collect()
}

#[test]
fn test_forecast_length_matches_request() {
    let engine = ForecastEngine::default();
    let data = series(&seasonal(36));
    for months in [1, 3, 6, 12, 24] {
        let report = engine.forecast(&data, months).unwrap();
        assert_eq!(report.forecast_data.len(), months);
    }
}

#[test]
fn test_forecast_months_are_consecutive() {
    let data = series(&seasonal(24));
    let report = ForecastEngine::default().forecast(&data, 8).unwrap();

    let last = data.last().unwrap().month;
    let mut expected = last;
    for point in &report.forecast_data {
        expected = expected.succ().unwrap();
        assert_eq!(point.month, expected);
    }
}

#[test]
fn test_step_advice_chains_from_current_price() {
    let data = series(&seasonal(24));
    let report = ForecastEngine::default().forecast(&data, 4).unwrap();

    let mut previous = report.current_price;
    for point in &report.forecast_data {
        let expected = step_advice(previous, point.price);
        assert_eq!(point.advice, expected.advice);
        assert_eq!(point.confidence, expected.confidence);
        previous = point.price;
    }
}

#[test]
fn test_forecast_trend_percentage_definition() {
    let data = series(&seasonal(30));
    let report = ForecastEngine::default().forecast(&data, 6).unwrap();

    let expected = (report.avg_forecast_price - report.current_price) / report.current_price * 100.0;
    assert!((report.forecast_trend_percentage - expected).abs() <= 0.005 + 1e-9);
}

#[test]
fn test_declining_series_sells() {
    let falling: Vec<f64> = (0..15).map(|i| 80.0 - i as f64 * 3.0).collect();
    let report = ForecastEngine::default().forecast(&series(&falling), 4).unwrap();

    assert_eq!(report.overall_advice, TrendOutlook::SteepFall);
    assert!(report
        .forecast_data
        .iter()
        .all(|p| p.advice == Advice::SellFast));
}

#[test]
fn test_statistics_idempotent() {
    let data = series(&seasonal(20));
    let first = summarize(&data).unwrap();
    let second = summarize(&data).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.trend_percentage,
        Some(trend_percentage(&data.prices()).unwrap())
    );
}

#[test]
fn test_custom_thresholds_flow_through_config() {
    use std::sync::Arc;

    let mut prices = vec![10.0; 6];
    prices.extend(vec![10.3; 6]);
    let store = MemorySeriesStore::new().with_series("rice", None, series(&prices));

    let strict = EngineConfig::default()
        .build_market(Arc::new(Catalog::builtin()), Arc::new(store.clone()))
        .unwrap();
    assert!(strict
        .recommendations(None, None, 6)
        .unwrap()
        .best_crops_to_grow
        .is_empty());

    let lenient = EngineConfig::builder()
        .min_trend_percentage(2.0)
        .build()
        .unwrap()
        .build_market(Arc::new(Catalog::builtin()), Arc::new(store))
        .unwrap();
    let ranked = lenient.recommendations(None, None, 6).unwrap().best_crops_to_grow;
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0].trend_percentage, 3.0);
}
