//! Anomaly Scoring Service Provider Interface
//!
//! Defines the scorer contract, the sample models it works on, and its errors.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::AnomalyScorer;
pub use error::{AnomalyError, Result};
pub use model::{Sample, ScoredSample, ScoredSeries, StdEstimator};
