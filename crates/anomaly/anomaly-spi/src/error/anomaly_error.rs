//! Anomaly scoring error types.

use thiserror::Error;

/// Anomaly scoring errors.
///
/// These are contract violations by the caller: an interactive shell should
/// never be able to produce them from its own controls.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnomalyError {
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl AnomalyError {
    /// Shorthand for [`AnomalyError::InvalidParameter`].
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for anomaly scoring operations.
pub type Result<T> = std::result::Result<T, AnomalyError>;
