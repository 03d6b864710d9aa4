//! Series store error types

use thiserror::Error;

/// Failures raised while reading a price series from its store.
///
/// A series that simply does not exist is not an error; stores report it
/// as `Ok(None)`.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SeriesError {
    /// Underlying storage could not be read
    #[error("I/O error reading {path}: {reason}")]
    Io { path: String, reason: String },

    /// The stored data is not in the expected format
    #[error("Parse error in {source_name}: {reason}")]
    Parse { source_name: String, reason: String },

    /// A single observation is invalid
    #[error("Invalid row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },

    /// Observations are not strictly increasing by month
    #[error("Series is not strictly increasing at {month}")]
    OutOfOrder { month: String },
}
