//! Sample types.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One observation of the series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: NaiveDateTime,
    pub value: f64,
}

impl Sample {
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Divisor convention for the rolling standard deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StdEstimator {
    /// Unbiased estimator, divides by `n - 1`.
    #[default]
    Sample,
    /// Divides by `n`.
    Population,
}

impl StdEstimator {
    /// Delta degrees of freedom subtracted from the window length.
    pub fn ddof(self) -> usize {
        match self {
            StdEstimator::Sample => 1,
            StdEstimator::Population => 0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            StdEstimator::Sample => "sample",
            StdEstimator::Population => "population",
        }
    }
}

/// A sample together with the trailing-window statistics it was judged by.
///
/// `rolling_mean` and `rolling_std` are `None` until the window is full, and
/// whenever the window holds a non-finite value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredSample {
    #[serde(flatten)]
    pub sample: Sample,
    pub rolling_mean: Option<f64>,
    pub rolling_std: Option<f64>,
    pub is_anomaly: bool,
}

impl ScoredSample {
    pub fn timestamp(&self) -> NaiveDateTime {
        self.sample.timestamp
    }

    pub fn value(&self) -> f64 {
        self.sample.value
    }

    /// Absolute distance from the rolling mean.
    pub fn deviation(&self) -> Option<f64> {
        self.rolling_mean.map(|mean| (self.sample.value - mean).abs())
    }

    /// Signed number of rolling standard deviations from the rolling mean.
    ///
    /// `None` when the statistics are undefined or the window is flat.
    pub fn z_score(&self) -> Option<f64> {
        match (self.rolling_mean, self.rolling_std) {
            (Some(mean), Some(std)) if std > 0.0 => Some((self.sample.value - mean) / std),
            _ => None,
        }
    }
}
