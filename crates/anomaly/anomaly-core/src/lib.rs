//! Anomaly Scoring Core
//!
//! Implementations for rolling-window anomaly scoring.

mod rolling;
mod window;

pub use rolling::*;
