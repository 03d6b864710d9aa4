//! Static registry entries

use serde::{Deserialize, Serialize};

/// A crop the service knows about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropInfo {
    /// Lookup key, e.g. `tomato`
    pub key: String,
    /// Display name, e.g. `Tomato`
    pub name: String,
    /// Unit label for prices, e.g. `₹/kg`
    pub unit: String,
}

impl CropInfo {
    pub fn new(key: &str, name: &str, unit: &str) -> Self {
        Self {
            key: key.to_string(),
            name: name.to_string(),
            unit: unit.to_string(),
        }
    }
}

/// A market location with its own price series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationInfo {
    pub key: String,
    pub label: String,
}

impl LocationInfo {
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
        }
    }
}
