//! Data error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Ingest, filtering and export errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// Upload could not be decoded or parsed into samples
    #[error("File parse error: {0}")]
    FileParse(String),

    /// Encoding label outside the supported set
    #[error("Unsupported encoding: {0}")]
    UnsupportedEncoding(String),

    /// Selected start date lies after the end date
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange { start: NaiveDate, end: NaiveDate },

    /// Spreadsheet could not be written or read back
    #[error("Export error: {0}")]
    Export(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(String),
}

impl DataError {
    /// Parse error located at a 1-based line of the upload.
    pub fn at_line(line: u64, message: impl std::fmt::Display) -> Self {
        Self::FileParse(format!("line {}: {}", line, message))
    }
}

impl From<std::io::Error> for DataError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;
