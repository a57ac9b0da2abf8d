//! Data Core
//!
//! Implementations for reading uploads, filtering by date and exporting
//! results.

pub mod decode;
pub mod export;
pub mod filter;
pub mod ingest;
pub mod timestamp;

pub use decode::decode;
pub use export::{export_to_path, read_xlsx, XlsxExporter, XLSX_CONTENT_TYPE};
pub use filter::{filter_rows, filter_scored};
pub use ingest::TsvReader;
pub use timestamp::parse_timestamp;
