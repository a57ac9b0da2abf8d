//! Series reader and exporter trait definitions.

use anomaly_spi::Sample;

use crate::error::Result;
use crate::model::ExportRow;

/// Turns uploaded bytes into an ordered sample sequence.
///
/// Implementations either return every sample of the upload or an error;
/// they never return a partial series.
pub trait SeriesReader: Send + Sync {
    /// Reader name, used in logs and error messages.
    fn name(&self) -> &str;

    /// Parse the raw upload.
    fn read(&self, bytes: &[u8]) -> Result<Vec<Sample>>;
}

/// Serializes result rows into a downloadable document.
pub trait SeriesExporter: Send + Sync {
    /// File extension of the produced document, without the dot.
    fn extension(&self) -> &str;

    /// MIME type of the produced document.
    fn content_type(&self) -> &str;

    /// Serialize `rows`, preserving their order.
    fn export(&self, rows: &[ExportRow]) -> Result<Vec<u8>>;
}
