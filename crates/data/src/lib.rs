//! # data
//!
//! Getting a series in and results out.
//!
//! This facade provides a single entry point to all data functionality:
//! - `SeriesReader`/`SeriesExporter` traits, `DateRange` and `TextEncoding` from SPI
//! - `IngestConfig` and `ExportConfig` from API
//! - `TsvReader`, `XlsxExporter` and the date filters from Core

// Re-export everything from SPI
pub use data_spi::*;

// Re-export everything from API
pub use data_api::*;

// Re-export everything from Core
pub use data_core::*;
