//! Contract definitions for series ingest and export.

mod series_io;

pub use series_io::{SeriesExporter, SeriesReader};
