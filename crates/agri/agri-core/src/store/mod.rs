//! Series store implementations

mod csv_store;
mod memory;

pub use csv_store::CsvSeriesStore;
pub use memory::MemorySeriesStore;

/// Keys reach file names, so only plain identifiers are accepted
pub(crate) fn is_safe_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
