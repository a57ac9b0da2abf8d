//! Data Service Provider Interface
//!
//! Defines traits and types for reading an uploaded series and exporting
//! scored results.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{SeriesExporter, SeriesReader};
pub use error::{DataError, Result};
pub use model::{DateRange, ExportRow, TextEncoding};
