//! Rolling z-score scorer.

use anomaly_api::RollingConfig;
use anomaly_spi::{AnomalyError, AnomalyScorer, Result, Sample, ScoredSample, ScoredSeries};

use crate::window::WindowStats;

// ============================================================================
// Rolling Scorer
// ============================================================================

/// Rolling z-score scorer.
///
/// Each sample is compared with the mean and standard deviation of the
/// trailing window that ends at (and includes) the sample itself. Samples
/// before the first full window, and samples whose window is flat, are never
/// flagged.
#[derive(Debug, Clone, Default)]
pub struct RollingScorer {
    config: RollingConfig,
}

impl RollingScorer {
    /// Create a scorer, rejecting an invalid configuration.
    pub fn new(config: RollingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RollingConfig {
        &self.config
    }
}

impl AnomalyScorer for RollingScorer {
    fn score(&self, samples: &[Sample]) -> Result<ScoredSeries> {
        if samples.is_empty() {
            return Err(AnomalyError::invalid("samples", "must not be empty"));
        }

        let RollingConfig {
            window_size,
            threshold,
            estimator,
        } = self.config;

        let mut stats = WindowStats::new(window_size);
        let mut scored = Vec::with_capacity(samples.len());

        for sample in samples {
            stats.push(sample.value);
            let (rolling_mean, rolling_std) = stats.moments(estimator);
            let is_anomaly = match (rolling_mean, rolling_std) {
                (Some(mean), Some(std)) if std > 0.0 => {
                    (sample.value - mean).abs() > threshold * std
                }
                _ => false,
            };

            scored.push(ScoredSample {
                sample: *sample,
                rolling_mean,
                rolling_std,
                is_anomaly,
            });
        }

        let series = ScoredSeries::new(scored, window_size, threshold, estimator);
        tracing::debug!(
            samples = series.len(),
            window_size,
            threshold,
            estimator = estimator.name(),
            anomalies = series.anomaly_count(),
            "scored series"
        );
        Ok(series)
    }

    fn window_size(&self) -> usize {
        self.config.window_size
    }

    fn threshold(&self) -> f64 {
        self.config.threshold
    }
}

/// Score `samples` with a trailing window and the sample standard deviation.
pub fn score(samples: &[Sample], window_size: usize, threshold: f64) -> Result<ScoredSeries> {
    RollingScorer::new(RollingConfig::new(window_size, threshold))?.score(samples)
}
