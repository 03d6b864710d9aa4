//! Crop and location registry
//!
//! Built once at startup and shared read-only by every request. Entry order
//! is preserved and used wherever ties need a deterministic winner.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use agri_spi::{CatalogError, CropInfo, LocationInfo};
use serde::{Deserialize, Serialize};

/// Label used for the location-agnostic default series
pub const DEFAULT_LOCATION_LABEL: &str = "Default";

const RUPEES_PER_KG: &str = "₹/kg";

/// Static crop and location registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    crops: Vec<CropInfo>,
    #[serde(default)]
    locations: Vec<LocationInfo>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Catalog {
    /// Validate and build a catalog
    pub fn new(crops: Vec<CropInfo>, locations: Vec<LocationInfo>) -> Result<Self, CatalogError> {
        if crops.is_empty() {
            return Err(CatalogError::NoCrops);
        }
        let mut seen = HashSet::new();
        for crop in &crops {
            if !seen.insert(crop.key.as_str()) {
                return Err(CatalogError::DuplicateKey {
                    kind: "crop",
                    key: crop.key.clone(),
                });
            }
        }
        let mut seen = HashSet::new();
        for location in &locations {
            if !seen.insert(location.key.as_str()) {
                return Err(CatalogError::DuplicateKey {
                    kind: "location",
                    key: location.key.clone(),
                });
            }
        }
        Ok(Self { crops, locations })
    }

    /// The crops and markets the service ships with
    pub fn builtin() -> Self {
        Self {
            crops: vec![
                CropInfo::new("tomato", "Tomato", RUPEES_PER_KG),
                CropInfo::new("rice", "Rice", RUPEES_PER_KG),
                CropInfo::new("wheat", "Wheat", RUPEES_PER_KG),
                CropInfo::new("potato", "Potato", RUPEES_PER_KG),
                CropInfo::new("onion", "Onion", RUPEES_PER_KG),
            ],
            locations: vec![
                LocationInfo::new("food_bazaar", "Food Bazaar"),
                LocationInfo::new("reliance_digital", "Reliance Digital"),
                LocationInfo::new("dmart", "DMart"),
            ],
        }
    }

    /// Parse a catalog from JSON: `{"crops": [...], "locations": [...]}`
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Catalog =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(raw.crops, raw.locations)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn crops(&self) -> &[CropInfo] {
        &self.crops
    }

    pub fn locations(&self) -> &[LocationInfo] {
        &self.locations
    }

    pub fn crop(&self, key: &str) -> Option<&CropInfo> {
        self.crops.iter().find(|c| c.key == key)
    }

    pub fn location(&self, key: &str) -> Option<&LocationInfo> {
        self.locations.iter().find(|l| l.key == key)
    }

    pub fn crop_keys(&self) -> Vec<&str> {
        self.crops.iter().map(|c| c.key.as_str()).collect()
    }

    /// Display label; unregistered keys label themselves
    pub fn location_label(&self, key: Option<&str>) -> String {
        match key {
            None => DEFAULT_LOCATION_LABEL.to_string(),
            Some(key) => self
                .location(key)
                .map(|l| l.label.clone())
                .unwrap_or_else(|| key.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let catalog = Catalog::builtin();
        assert_eq!(
            catalog.crop_keys(),
            vec!["tomato", "rice", "wheat", "potato", "onion"]
        );
        assert_eq!(catalog.crop("onion").unwrap().name, "Onion");
        assert_eq!(catalog.crop("onion").unwrap().unit, "₹/kg");
        assert!(catalog.crop("mango").is_none());
    }

    #[test]
    fn test_location_labels() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.location_label(None), "Default");
        assert_eq!(catalog.location_label(Some("dmart")), "DMart");
        assert_eq!(catalog.location_label(Some("corner_shop")), "corner_shop");
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "crops": [{"key": "maize", "name": "Maize", "unit": "₹/quintal"}],
            "locations": [{"key": "azadpur", "label": "Azadpur Mandi"}]
        }"#;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.crop_keys(), vec!["maize"]);
        assert_eq!(catalog.location_label(Some("azadpur")), "Azadpur Mandi");
    }

    #[test]
    fn test_locations_are_optional_in_json() {
        let json = r#"{"crops": [{"key": "maize", "name": "Maize", "unit": "₹/kg"}]}"#;
        assert!(Catalog::from_json(json).unwrap().locations().is_empty());
    }

    #[test]
    fn test_rejects_duplicates_and_empty() {
        let crops = vec![
            CropInfo::new("rice", "Rice", "₹/kg"),
            CropInfo::new("rice", "Rice again", "₹/kg"),
        ];
        assert_eq!(
            Catalog::new(crops, vec![]),
            Err(CatalogError::DuplicateKey {
                kind: "crop",
                key: "rice".to_string()
            })
        );
        assert_eq!(Catalog::new(vec![], vec![]), Err(CatalogError::NoCrops));
        assert!(matches!(
            Catalog::from_json("not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = Catalog::from_json_file("/nonexistent/catalog.json");
        assert!(matches!(result, Err(CatalogError::Io { .. })));
    }
}
