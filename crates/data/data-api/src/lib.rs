//! Data API
//!
//! Configuration types and builders for reading uploads and exporting results.

mod config;

pub use config::*;

// Re-export SPI types
pub use data_spi::{
    DataError, DateRange, ExportRow, Result, SeriesExporter, SeriesReader, TextEncoding,
};
