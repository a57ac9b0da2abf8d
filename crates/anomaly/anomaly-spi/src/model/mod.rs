//! Data models for anomaly scoring.
//!
//! This module contains the sample types consumed and produced by scorers.

mod sample;
mod scored_series;

pub use sample::{Sample, ScoredSample, StdEstimator};
pub use scored_series::ScoredSeries;
