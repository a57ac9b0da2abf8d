//! Session defaults and their environment overrides.

use anomaly::{validate_shell_threshold, DEFAULT_THRESHOLD, DEFAULT_WINDOW_SIZE};
use data::{TextEncoding, DEFAULT_EXPORT_FILE_NAME};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// Overrides the initial threshold.
pub const THRESHOLD_VAR: &str = "ANOMALY_THRESHOLD";

/// Overrides the initial encoding.
pub const ENCODING_VAR: &str = "ANOMALY_ENCODING";

/// Overrides the export file name.
pub const EXPORT_FILE_VAR: &str = "ANOMALY_EXPORT_FILE";

/// Session defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Trailing window length used for scoring
    pub window_size: usize,
    /// Threshold before the user moves the slider
    pub default_threshold: f64,
    /// Encoding before the user picks one
    pub default_encoding: TextEncoding,
    /// File name offered for the export
    pub export_file_name: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            default_threshold: DEFAULT_THRESHOLD,
            default_encoding: TextEncoding::default(),
            export_file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl SessionConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(THRESHOLD_VAR) {
            let threshold: f64 = raw
                .trim()
                .parse()
                .map_err(|_| SessionError::Config(format!("{}: not a number: {}", THRESHOLD_VAR, raw)))?;
            validate_shell_threshold(threshold)
                .map_err(|e| SessionError::Config(format!("{}: {}", THRESHOLD_VAR, e)))?;
            config.default_threshold = threshold;
        }

        if let Some(raw) = lookup(ENCODING_VAR) {
            config.default_encoding = raw
                .parse()
                .map_err(|e| SessionError::Config(format!("{}: {}", ENCODING_VAR, e)))?;
        }

        if let Some(raw) = lookup(EXPORT_FILE_VAR) {
            let name = raw.trim();
            if name.is_empty() {
                return Err(SessionError::Config(format!("{}: empty file name", EXPORT_FILE_VAR)));
            }
            config.export_file_name = name.to_string();
        }

        Ok(config)
    }
}
