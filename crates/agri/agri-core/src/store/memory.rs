//! In-memory series store

use std::collections::HashMap;

use agri_spi::{LookupKey, PriceSeries, SeriesError, SeriesStore};

/// Series held in memory, keyed by crop and optional location
#[derive(Debug, Clone, Default)]
pub struct MemorySeriesStore {
    series: HashMap<(String, Option<String>), PriceSeries>,
}

impl MemorySeriesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a series; `location: None` is the default series
    pub fn insert(&mut self, crop: &str, location: Option<&str>, series: PriceSeries) {
        self.series
            .insert((crop.to_string(), location.map(str::to_string)), series);
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with_series(mut self, crop: &str, location: Option<&str>, series: PriceSeries) -> Self {
        self.insert(crop, location, series);
        self
    }
}

impl SeriesStore for MemorySeriesStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn fetch(&self, crop: &str, key: LookupKey<'_>) -> Result<Option<PriceSeries>, SeriesError> {
        let lookup = (crop.to_string(), key.location().map(str::to_string));
        Ok(self.series.get(&lookup).cloned())
    }
}
