//! CSV-backed series store
//!
//! Layout inside the data directory:
//!
//! - `{crop}_prices.csv`: the location-agnostic default series
//! - `{crop}_{location}_prices.csv`: the series at one location
//!
//! Each file has a header row with `month` (`YYYY-MM` or `YYYY-MM-DD`) and
//! `price` columns; other columns are ignored.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use agri_spi::{LookupKey, Month, PricePoint, PriceSeries, SeriesError, SeriesStore};
use serde::Deserialize;

use super::is_safe_key;

#[derive(Debug, Deserialize)]
struct CsvRow {
    month: String,
    price: f64,
}

/// Reads series from CSV files on every call; nothing is cached
#[derive(Debug, Clone)]
pub struct CsvSeriesStore {
    data_dir: PathBuf,
}

impl CsvSeriesStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File holding the series for `crop` under `key`
    pub fn path_for(&self, crop: &str, key: LookupKey<'_>) -> PathBuf {
        let file_name = match key {
            LookupKey::Location(location) => format!("{crop}_{location}_prices.csv"),
            LookupKey::Default => format!("{crop}_prices.csv"),
        };
        self.data_dir.join(file_name)
    }

    /// Parse CSV content into a chronologically sorted series
    pub fn parse<R: Read>(reader: R, source_name: &str) -> Result<PriceSeries, SeriesError> {
        let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

        let mut points = Vec::new();
        for (row, record) in csv_reader.deserialize::<CsvRow>().enumerate() {
            let record = record.map_err(|e| SeriesError::Parse {
                source_name: source_name.to_string(),
                reason: e.to_string(),
            })?;
            let month = Month::parse(&record.month).ok_or_else(|| SeriesError::InvalidRow {
                row: row + 1,
                reason: format!("invalid month '{}'", record.month),
            })?;
            points.push(PricePoint::new(month, record.price));
        }

        points.sort_by_key(|p| p.month);
        PriceSeries::new(points)
    }
}

impl SeriesStore for CsvSeriesStore {
    fn name(&self) -> &str {
        "csv"
    }

    fn fetch(&self, crop: &str, key: LookupKey<'_>) -> Result<Option<PriceSeries>, SeriesError> {
        let keys_safe = is_safe_key(crop) && key.location().map_or(true, is_safe_key);
        if !keys_safe {
            tracing::warn!(crop, location = ?key.location(), "rejecting unsafe series key");
            return Ok(None);
        }

        let path = self.path_for(crop, key);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "series file not found");
                return Ok(None);
            }
            Err(e) => {
                return Err(SeriesError::Io {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })
            }
        };

        let series = Self::parse(file, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), observations = series.len(), "loaded series");
        Ok(Some(series))
    }
}
