//! Contract definitions for anomaly scoring.
//!
//! This module contains trait definitions that scorers must implement.

mod anomaly_scorer;

pub use anomaly_scorer::AnomalyScorer;
