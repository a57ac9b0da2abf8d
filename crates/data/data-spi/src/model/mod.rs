//! Data models for ingest, filtering and export.

mod date_range;
mod encoding;
mod export_row;

pub use date_range::DateRange;
pub use encoding::TextEncoding;
pub use export_row::ExportRow;
