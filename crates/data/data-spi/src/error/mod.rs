//! Error types for ingest and export.

mod data_error;

pub use data_error::{DataError, Result};
