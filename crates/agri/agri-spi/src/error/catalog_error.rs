//! Catalog loading error types

use thiserror::Error;

/// Failures loading or validating a crop/location catalog
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Malformed catalog: {0}")]
    Parse(String),

    #[error("Duplicate {kind} key '{key}'")]
    DuplicateKey { kind: &'static str, key: String },

    #[error("Catalog defines no crops")]
    NoCrops,
}
