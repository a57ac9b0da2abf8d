//! Session error types.

use anomaly::AnomalyError;
use data::DataError;
use thiserror::Error;

/// Errors reported to the user. None of them ends the session.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SessionError {
    #[error("{0}")]
    Data(#[from] DataError),

    #[error("{0}")]
    Anomaly(#[from] AnomalyError),

    /// Nothing has been uploaded, or the last upload failed to parse
    #[error("No data: upload a file first")]
    NoData,

    /// Bad value in the environment
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
