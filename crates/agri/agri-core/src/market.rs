//! Request-scoped service over the catalog, a series store and the engines
//!
//! Holds only read-only state, so one instance can serve concurrent
//! requests; every call reloads its series from the store.

use std::sync::Arc;

use agri_spi::{
    CropForecast, CropInfo, CropSummary, ForecastOutlook, MarketError, PriceSeries,
    Recommendations, Result, SeriesStore,
};

use crate::catalog::Catalog;
use crate::forecast::{ForecastEngine, MAX_HORIZON};
use crate::recommendation::RecommendationEngine;
use crate::statistics;

/// Crop price service
#[derive(Clone)]
pub struct CropMarket {
    catalog: Arc<Catalog>,
    store: Arc<dyn SeriesStore>,
    forecaster: ForecastEngine,
    recommender: RecommendationEngine,
}

impl CropMarket {
    pub fn new(catalog: Arc<Catalog>, store: Arc<dyn SeriesStore>) -> Self {
        Self {
            catalog,
            store,
            forecaster: ForecastEngine::default(),
            recommender: RecommendationEngine::default(),
        }
    }

    pub fn with_forecaster(mut self, forecaster: ForecastEngine) -> Self {
        self.forecaster = forecaster;
        self
    }

    pub fn with_recommender(mut self, recommender: RecommendationEngine) -> Self {
        self.recommender = recommender;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn store(&self) -> &dyn SeriesStore {
        self.store.as_ref()
    }

    fn crop_info(&self, crop: &str) -> Result<&CropInfo> {
        self.catalog
            .crop(crop)
            .ok_or_else(|| MarketError::UnknownCrop(crop.to_string()))
    }

    /// Load a non-empty series via the location fallback chain.
    ///
    /// Owns the mapping of a missing or empty series to `DataUnavailable`,
    /// so the engines' `EmptySeries` never reaches callers.
    fn load_series(&self, crop: &str, location: Option<&str>) -> Result<PriceSeries> {
        match self.store.load(crop, location)? {
            Some(series) if !series.is_empty() => Ok(series),
            _ => Err(MarketError::data_unavailable(crop, location)),
        }
    }

    /// Statistics for `crop` at `location` (default series as fallback)
    pub fn crop_summary(&self, crop: &str, location: Option<&str>) -> Result<CropSummary> {
        let info = self.crop_info(crop)?;
        let series = self.load_series(crop, location)?;
        let summary = statistics::summarize(&series)?;
        Ok(CropSummary {
            crop_name: info.name.clone(),
            unit: info.unit.clone(),
            location: location.map(str::to_string),
            location_label: self.catalog.location_label(location),
            summary,
        })
    }

    /// Forecast `months` ahead for `crop` at `location`
    pub fn crop_forecast(
        &self,
        crop: &str,
        location: Option<&str>,
        months: usize,
    ) -> Result<CropForecast> {
        let info = self.crop_info(crop)?;
        let series = self.load_series(crop, location)?;
        let report = self.forecaster.forecast(&series, months)?;
        Ok(CropForecast {
            crop_name: info.name.clone(),
            unit: info.unit.clone(),
            location: location.map(str::to_string),
            location_label: self.catalog.location_label(location),
            months,
            report,
        })
    }

    /// Best market for `crop` (when known) and best crops at `location`.
    ///
    /// Missing data shrinks the answer instead of failing it; only an
    /// out-of-range `months` is an error.
    pub fn recommendations(
        &self,
        crop: Option<&str>,
        location: Option<&str>,
        months: usize,
    ) -> Result<Recommendations> {
        if months == 0 || months > MAX_HORIZON {
            return Err(MarketError::InvalidParameter {
                name: "months".to_string(),
                reason: format!("must be between 1 and {MAX_HORIZON}"),
            });
        }

        let known_crop = crop.filter(|c| self.catalog.crop(c).is_some());

        let best_location_to_sell = known_crop.and_then(|c| {
            self.recommender
                .best_location(&self.catalog, self.store.as_ref(), c)
        });

        let best_crops_to_grow =
            self.recommender
                .best_crops_to_grow(&self.catalog, self.store.as_ref(), location);

        let forecast_outlook = known_crop.and_then(|c| match self.crop_forecast(c, location, months) {
            Ok(forecast) => Some(ForecastOutlook {
                crop: c.to_string(),
                months,
                overall_advice: forecast.report.overall_advice,
                avg_forecast_price: forecast.report.avg_forecast_price,
                forecast_trend_percentage: forecast.report.forecast_trend_percentage,
            }),
            Err(err) => {
                tracing::debug!(crop = c, error = %err, "no forecast outlook");
                None
            }
        });

        Ok(Recommendations {
            location: location.map(str::to_string),
            location_label: self.catalog.location_label(location),
            best_location_to_sell,
            best_crops_to_grow,
            forecast_outlook,
        })
    }
}
