//! Series store contract

use crate::error::SeriesError;
use crate::model::PriceSeries;

/// One place a series may be found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKey<'a> {
    /// The series recorded at a specific location
    Location(&'a str),
    /// The location-agnostic series
    Default,
}

impl<'a> LookupKey<'a> {
    pub fn location(&self) -> Option<&'a str> {
        match self {
            LookupKey::Location(key) => Some(*key),
            LookupKey::Default => None,
        }
    }
}

/// Keys tried, in order, when loading a series for an optional location
pub fn lookup_chain(location: Option<&str>) -> Vec<LookupKey<'_>> {
    match location {
        Some(key) => vec![LookupKey::Location(key), LookupKey::Default],
        None => vec![LookupKey::Default],
    }
}

/// Source of monthly price series.
///
/// A missing series is `Ok(None)`; `Err` is reserved for stores that exist
/// but cannot be read.
pub trait SeriesStore: Send + Sync {
    /// Store name, for logs
    fn name(&self) -> &str;

    /// Read exactly one key, no fallback
    fn fetch(&self, crop: &str, key: LookupKey<'_>) -> Result<Option<PriceSeries>, SeriesError>;

    /// Walk the [`lookup_chain`] for `location`; the first non-empty
    /// series wins
    fn load(&self, crop: &str, location: Option<&str>) -> Result<Option<PriceSeries>, SeriesError> {
        for key in lookup_chain(location) {
            match self.fetch(crop, key)? {
                Some(series) if !series.is_empty() => return Ok(Some(series)),
                _ => continue,
            }
        }
        Ok(None)
    }
}
