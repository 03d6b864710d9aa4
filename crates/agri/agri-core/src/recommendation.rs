//! Recommendation aggregator
//!
//! - [`RecommendationEngine::best_location`]: where a crop sells for the most today
//! - [`RecommendationEngine::best_crops_to_grow`]: crops with the strongest
//!   recent upward trend at a location

use std::iter;

use agri_spi::{BestLocation, CropTrend, LocationPrice, LookupKey, SeriesStore};

use crate::catalog::Catalog;
use crate::statistics::{trend_percentage, TREND_HISTORY};

/// Thresholds for crop ranking
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationEngine {
    min_history: usize,
    min_trend_percentage: f64,
    max_results: usize,
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self {
            min_history: TREND_HISTORY,
            min_trend_percentage: 5.0,
            max_results: 3,
        }
    }
}

impl RecommendationEngine {
    pub fn new(min_history: usize, min_trend_percentage: f64, max_results: usize) -> Self {
        Self {
            min_history,
            min_trend_percentage,
            max_results,
        }
    }

    pub fn min_history(&self) -> usize {
        self.min_history
    }

    pub fn min_trend_percentage(&self) -> f64 {
        self.min_trend_percentage
    }

    pub fn max_results(&self) -> usize {
        self.max_results
    }

    /// Compare the crop's own series at every registered location plus the
    /// default series, and pick the highest current price.
    ///
    /// Series that fail to load or are empty are left out; `None` when none
    /// remain. Ties keep the earliest entry in catalog order, default last.
    pub fn best_location(
        &self,
        catalog: &Catalog,
        store: &dyn SeriesStore,
        crop: &str,
    ) -> Option<BestLocation> {
        let keys = catalog
            .locations()
            .iter()
            .map(|l| LookupKey::Location(l.key.as_str()))
            .chain(iter::once(LookupKey::Default));

        let mut all_locations = Vec::new();
        for key in keys {
            let series = match store.fetch(crop, key) {
                Ok(Some(series)) => series,
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!(crop, location = ?key.location(), error = %err, "skipping unreadable series");
                    continue;
                }
            };
            if let Some(price) = series.current_price() {
                all_locations.push(LocationPrice {
                    location: key.location().map(str::to_string),
                    location_label: catalog.location_label(key.location()),
                    price,
                });
            }
        }

        let mut best: Option<&LocationPrice> = None;
        for candidate in &all_locations {
            if best.map_or(true, |b| candidate.price > b.price) {
                best = Some(candidate);
            }
        }
        let best = best?.clone();

        Some(BestLocation {
            crop: crop.to_string(),
            best,
            all_locations,
        })
    }

    /// Rank crops at `location` (default series as fallback) by their
    /// 6-month trend, strongest first.
    ///
    /// Crops with too little history or a zero trend denominator are
    /// skipped; only trends above the threshold are returned.
    pub fn best_crops_to_grow(
        &self,
        catalog: &Catalog,
        store: &dyn SeriesStore,
        location: Option<&str>,
    ) -> Vec<CropTrend> {
        let mut ranked = Vec::new();
        for crop in catalog.crops() {
            let series = match store.load(&crop.key, location) {
                Ok(Some(series)) => series,
                Ok(None) => continue,
                Err(err) => {
                    tracing::warn!(crop = %crop.key, error = %err, "skipping unreadable series");
                    continue;
                }
            };
            if series.len() < self.min_history {
                continue;
            }
            let Ok(trend) = trend_percentage(&series.prices()) else {
                continue;
            };
            let Some(current_price) = series.current_price() else {
                continue;
            };
            ranked.push(CropTrend {
                crop: crop.key.clone(),
                crop_name: crop.name.clone(),
                unit: crop.unit.clone(),
                trend_percentage: trend,
                current_price,
            });
        }

        ranked.sort_by(|a, b| b.trend_percentage.total_cmp(&a.trend_percentage));
        ranked
            .into_iter()
            .filter(|c| c.trend_percentage > self.min_trend_percentage)
            .take(self.max_results)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemorySeriesStore;
    use agri_spi::{Month, PriceSeries};

    fn series(prices: &[f64]) -> PriceSeries {
        PriceSeries::from_prices(Month::new(2023, 1).unwrap(), prices).unwrap()
    }

    /// Twelve months: six at `base`, six at `base * (1 + pct/100)`
    fn trending(base: f64, pct: f64) -> PriceSeries {
        let mut prices = vec![base; 6];
        prices.extend(vec![base * (1.0 + pct / 100.0); 6]);
        series(&prices)
    }

    #[test]
    fn test_best_location_picks_highest_current_price() {
        let store = MemorySeriesStore::new()
            .with_series("tomato", Some("food_bazaar"), series(&[30.0, 50.0]))
            .with_series("tomato", Some("reliance_digital"), series(&[60.0, 42.0]))
            .with_series("tomato", None, series(&[45.0]));

        let result = RecommendationEngine::default()
            .best_location(&Catalog::builtin(), &store, "tomato")
            .unwrap();

        assert_eq!(result.best.location.as_deref(), Some("food_bazaar"));
        assert_eq!(result.best.location_label, "Food Bazaar");
        assert_eq!(result.best.price, 50.0);
        assert_eq!(result.all_locations.len(), 3);
    }

    #[test]
    fn test_best_location_can_be_default() {
        let store = MemorySeriesStore::new()
            .with_series("rice", Some("dmart"), series(&[38.0]))
            .with_series("rice", None, series(&[41.0]));

        let result = RecommendationEngine::default()
            .best_location(&Catalog::builtin(), &store, "rice")
            .unwrap();
        assert_eq!(result.best.location, None);
        assert_eq!(result.best.location_label, "Default");
    }

    #[test]
    fn test_best_location_tie_keeps_catalog_order() {
        let store = MemorySeriesStore::new()
            .with_series("rice", Some("dmart"), series(&[40.0]))
            .with_series("rice", Some("food_bazaar"), series(&[40.0]));

        let result = RecommendationEngine::default()
            .best_location(&Catalog::builtin(), &store, "rice")
            .unwrap();
        assert_eq!(result.best.location.as_deref(), Some("food_bazaar"));
    }

    #[test]
    fn test_best_location_without_data() {
        let store = MemorySeriesStore::new()
            .with_series("rice", None, PriceSeries::default());
        assert!(RecommendationEngine::default()
            .best_location(&Catalog::builtin(), &store, "rice")
            .is_none());
    }

    #[test]
    fn test_best_crops_ranked_filtered_and_capped() {
        let store = MemorySeriesStore::new()
            .with_series("tomato", None, trending(20.0, 30.0))
            .with_series("rice", None, trending(40.0, 8.0))
            .with_series("wheat", None, trending(25.0, 12.0))
            .with_series("potato", None, trending(15.0, 20.0))
            .with_series("onion", None, trending(30.0, 4.0));

        let ranked = RecommendationEngine::default().best_crops_to_grow(
            &Catalog::builtin(),
            &store,
            None,
        );

        let keys: Vec<&str> = ranked.iter().map(|c| c.crop.as_str()).collect();
        assert_eq!(keys, vec!["tomato", "potato", "wheat"]);
        assert!(ranked.iter().all(|c| c.trend_percentage > 5.0));
        assert!(ranked
            .windows(2)
            .all(|w| w[0].trend_percentage >= w[1].trend_percentage));
    }

    #[test]
    fn test_best_crops_skip_short_and_zero_denominator() {
        let mut zero_then_up = vec![0.0; 6];
        zero_then_up.extend(vec![10.0; 6]);
        let store = MemorySeriesStore::new()
            .with_series("tomato", None, series(&[1.0, 2.0, 3.0]))
            .with_series("rice", None, series(&zero_then_up))
            .with_series("wheat", None, trending(25.0, 12.0));

        let ranked = RecommendationEngine::default().best_crops_to_grow(
            &Catalog::builtin(),
            &store,
            None,
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].crop, "wheat");
        assert_eq!(ranked[0].crop_name, "Wheat");
    }

    #[test]
    fn test_best_crops_use_location_then_default() {
        let store = MemorySeriesStore::new()
            .with_series("tomato", None, trending(20.0, 2.0))
            .with_series("tomato", Some("dmart"), trending(20.0, 9.0))
            .with_series("onion", None, trending(30.0, 7.0));

        let ranked = RecommendationEngine::default().best_crops_to_grow(
            &Catalog::builtin(),
            &store,
            Some("dmart"),
        );
        let keys: Vec<&str> = ranked.iter().map(|c| c.crop.as_str()).collect();
        assert_eq!(keys, vec!["tomato", "onion"]);
    }

    #[test]
    fn test_threshold_is_strict() {
        let store = MemorySeriesStore::new().with_series("rice", None, trending(100.0, 5.0));
        let ranked = RecommendationEngine::default().best_crops_to_grow(
            &Catalog::builtin(),
            &store,
            None,
        );
        assert!(ranked.is_empty());
    }
}
