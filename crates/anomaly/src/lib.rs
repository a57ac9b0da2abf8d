//! # anomaly
//!
//! Rolling-window anomaly scoring for single-variable time series.
//!
//! This facade provides a single entry point to all scoring functionality:
//! - `AnomalyScorer` trait and the sample models from SPI
//! - `RollingConfig` and the shell threshold bounds from API
//! - `RollingScorer` and the `score` shorthand from Core

// Re-export everything from SPI
pub use anomaly_spi::*;

// Re-export everything from API
pub use anomaly_api::*;

// Re-export everything from Core
pub use anomaly_core::*;
