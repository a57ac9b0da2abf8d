//! Scored series result type.

use serde::{Deserialize, Serialize};

use super::sample::{ScoredSample, StdEstimator};

/// Output of one scoring pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSeries {
    /// Scored samples, in input order.
    pub samples: Vec<ScoredSample>,
    /// Trailing window length used.
    pub window_size: usize,
    /// Threshold used for flagging.
    pub threshold: f64,
    /// Standard deviation convention used.
    pub estimator: StdEstimator,
}

impl ScoredSeries {
    /// Create a new scored series.
    pub fn new(
        samples: Vec<ScoredSample>,
        window_size: usize,
        threshold: f64,
        estimator: StdEstimator,
    ) -> Self {
        Self {
            samples,
            window_size,
            threshold,
            estimator,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredSample> {
        self.samples.iter()
    }

    /// Flagged samples, in input order.
    pub fn anomalies(&self) -> impl Iterator<Item = &ScoredSample> + '_ {
        self.samples.iter().filter(|s| s.is_anomaly)
    }

    /// Get indices of flagged samples.
    pub fn anomaly_indices(&self) -> Vec<usize> {
        self.samples
            .iter()
            .enumerate()
            .filter_map(|(i, s)| if s.is_anomaly { Some(i) } else { None })
            .collect()
    }

    /// Count of flagged samples.
    pub fn anomaly_count(&self) -> usize {
        self.anomalies().count()
    }
}

impl<'a> IntoIterator for &'a ScoredSeries {
    type Item = &'a ScoredSample;
    type IntoIter = std::slice::Iter<'a, ScoredSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
