//! Contracts implemented by models and series stores

mod predictor;
mod series_store;

pub use predictor::{IntervalPredictor, Predictor};
pub use series_store::{lookup_chain, LookupKey, SeriesStore};
