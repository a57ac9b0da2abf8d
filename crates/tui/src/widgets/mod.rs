//! Reusable widgets for the TUI.

mod chart;

pub use chart::{create_anomaly_chart, ChartData};
