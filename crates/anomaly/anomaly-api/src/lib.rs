//! Anomaly Scoring API
//!
//! Configuration types and builders for rolling-window anomaly scoring.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use anomaly_spi::{
    AnomalyError, AnomalyScorer, Result, Sample, ScoredSample, ScoredSeries, StdEstimator,
};

/// Trailing window length used by the service.
pub const DEFAULT_WINDOW_SIZE: usize = 7;

/// Threshold preselected in the interactive shell.
pub const DEFAULT_THRESHOLD: f64 = 3.0;

/// Lowest threshold the interactive shell offers.
pub const MIN_THRESHOLD: f64 = 1.0;

/// Highest threshold the interactive shell offers.
pub const MAX_THRESHOLD: f64 = 5.0;

// ============================================================================
// Rolling Configuration
// ============================================================================

/// Rolling z-score scorer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingConfig {
    /// Trailing window length (default: 7).
    pub window_size: usize,
    /// Multiple of the rolling std a deviation must exceed (default: 3.0).
    pub threshold: f64,
    /// Standard deviation convention (default: sample, `n - 1`).
    #[serde(default)]
    pub estimator: StdEstimator,
}

impl Default for RollingConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            threshold: DEFAULT_THRESHOLD,
            estimator: StdEstimator::Sample,
        }
    }
}

impl RollingConfig {
    pub fn new(window_size: usize, threshold: f64) -> Self {
        Self {
            window_size,
            threshold,
            estimator: StdEstimator::Sample,
        }
    }

    /// Same configuration with another threshold.
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Same configuration with another standard deviation convention.
    pub fn with_estimator(mut self, estimator: StdEstimator) -> Self {
        self.estimator = estimator;
        self
    }

    /// Check the scorer's input constraints.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(AnomalyError::invalid("window_size", "must be at least 1"));
        }
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(AnomalyError::invalid(
                "threshold",
                format!("must be a positive finite number, got {}", self.threshold),
            ));
        }
        Ok(())
    }
}

/// Check that a threshold lies in the range the interactive shell exposes.
pub fn validate_shell_threshold(threshold: f64) -> Result<()> {
    if !(MIN_THRESHOLD..=MAX_THRESHOLD).contains(&threshold) {
        return Err(AnomalyError::invalid(
            "threshold",
            format!(
                "must be in range [{:.1}, {:.1}], got {}",
                MIN_THRESHOLD, MAX_THRESHOLD, threshold
            ),
        ));
    }
    Ok(())
}

/// Clamp a threshold into the shell range.
pub fn clamp_shell_threshold(threshold: f64) -> f64 {
    if threshold.is_nan() {
        return DEFAULT_THRESHOLD;
    }
    threshold.clamp(MIN_THRESHOLD, MAX_THRESHOLD)
}
