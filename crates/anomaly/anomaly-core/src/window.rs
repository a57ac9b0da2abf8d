//! Running moments over a fixed-length trailing window.

use std::collections::VecDeque;

use anomaly_spi::StdEstimator;

/// Once the squared-deviation sum shrinks below this share of its peak since
/// the last recomputation, it is summed again from the stored window.
const RESYNC_RATIO: f64 = 1.0 / 1024.0;

/// Sliding window of fixed capacity with incrementally updated moments.
///
/// Finite values feed a Welford mean and sum of squared deviations. Removing
/// a value that dominated that sum leaves mostly rounding error behind, so a
/// sharp drop triggers a two-pass recomputation over the stored values.
/// Non-finite values are counted but never summed; a window that holds one
/// has no defined moments.
#[derive(Debug, Clone)]
pub(crate) struct WindowStats {
    capacity: usize,
    values: VecDeque<f64>,
    finite: usize,
    mean: f64,
    m2: f64,
    peak_m2: f64,
    /// Length of the run of identical values ending at the newest one.
    run: usize,
}

impl WindowStats {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity + 1),
            finite: 0,
            mean: 0.0,
            m2: 0.0,
            peak_m2: 0.0,
            run: 0,
        }
    }

    /// Slide the window forward by one value, dropping the oldest when full.
    pub(crate) fn push(&mut self, value: f64) {
        self.run = if !value.is_finite() {
            0
        } else if self.values.back() == Some(&value) {
            self.run + 1
        } else {
            1
        };

        self.values.push_back(value);
        if value.is_finite() {
            self.add(value);
        }

        if self.values.len() > self.capacity {
            if let Some(old) = self.values.pop_front() {
                if old.is_finite() {
                    self.remove(old);
                }
            }
        }
    }

    fn add(&mut self, value: f64) {
        self.finite += 1;
        let delta = value - self.mean;
        self.mean += delta / self.finite as f64;
        self.m2 += delta * (value - self.mean);
        self.peak_m2 = self.peak_m2.max(self.m2);
    }

    fn remove(&mut self, value: f64) {
        self.finite -= 1;
        if self.finite == 0 {
            self.mean = 0.0;
            self.m2 = 0.0;
            self.peak_m2 = 0.0;
            return;
        }

        let delta = value - self.mean;
        self.mean -= delta / self.finite as f64;
        self.m2 -= delta * (value - self.mean);

        if self.m2 < self.peak_m2 * RESYNC_RATIO {
            self.resync();
        }
    }

    /// Recompute mean and squared deviations from the stored values.
    fn resync(&mut self) {
        let n = self.finite as f64;
        let sum: f64 = self.values.iter().filter(|v| v.is_finite()).sum();
        let mean = sum / n;
        self.mean = mean;
        self.m2 = self
            .values
            .iter()
            .filter(|v| v.is_finite())
            .map(|v| (v - mean) * (v - mean))
            .sum();
        self.peak_m2 = self.m2;
    }

    /// Mean and standard deviation of a full window.
    ///
    /// Both are `None` while the window is filling or holds a non-finite
    /// value. The deviation is also `None` when the window has no degrees of
    /// freedom left (sample estimator with capacity 1).
    pub(crate) fn moments(&self, estimator: StdEstimator) -> (Option<f64>, Option<f64>) {
        if self.values.len() < self.capacity || self.finite < self.capacity {
            return (None, None);
        }

        let ddof = estimator.ddof();
        let has_dof = self.capacity > ddof;

        // A flat window is reported exactly, without rounding residue.
        if self.run >= self.capacity {
            let std = if has_dof { Some(0.0) } else { None };
            return (self.values.back().copied(), std);
        }

        if !has_dof {
            return (Some(self.mean), None);
        }
        let variance = self.m2.max(0.0) / (self.capacity - ddof) as f64;
        (Some(self.mean), Some(variance.sqrt()))
    }
}
