//! Exported result row.

use anomaly_spi::ScoredSample;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One row of the result document: `time | value | anomaly`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExportRow {
    #[serde(rename = "time")]
    pub timestamp: NaiveDateTime,
    pub value: f64,
    #[serde(rename = "anomaly")]
    pub is_anomaly: bool,
}

impl ExportRow {
    pub fn new(timestamp: NaiveDateTime, value: f64, is_anomaly: bool) -> Self {
        Self {
            timestamp,
            value,
            is_anomaly,
        }
    }
}

impl From<&ScoredSample> for ExportRow {
    fn from(scored: &ScoredSample) -> Self {
        Self::new(scored.sample.timestamp, scored.sample.value, scored.is_anomaly)
    }
}
