//! Anomaly scorer trait definition.

use crate::error::Result;
use crate::model::{Sample, ScoredSeries};

/// Anomaly scorer trait.
///
/// A scorer is a pure function of its configuration and the samples it is
/// given: it never re-orders, mutates or retains the input.
pub trait AnomalyScorer: Send + Sync {
    /// Score every sample, in the order given.
    fn score(&self, samples: &[Sample]) -> Result<ScoredSeries>;

    /// Number of samples in the trailing window.
    fn window_size(&self) -> usize;

    /// Multiple of the rolling standard deviation a deviation must exceed.
    fn threshold(&self) -> f64;
}
