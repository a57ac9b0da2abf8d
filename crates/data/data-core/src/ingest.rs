//! Delimited-text reader for uploaded series.

use std::path::Path;

use anomaly_spi::Sample;
use data_api::IngestConfig;
use data_spi::{DataError, Result, SeriesReader, TextEncoding};

use crate::decode::decode;
use crate::timestamp::parse_timestamp;

/// Reads a header-prefixed delimited file with a timestamp and a value
/// column into samples, in file order.
#[derive(Debug, Clone, Default)]
pub struct TsvReader {
    config: IngestConfig,
}

impl TsvReader {
    pub fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Tab-separated reader with default column names.
    pub fn with_encoding(encoding: TextEncoding) -> Self {
        Self::new(IngestConfig::tsv(encoding))
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Read and parse a file from disk.
    pub fn read_path(&self, path: &Path) -> Result<Vec<Sample>> {
        let bytes = std::fs::read(path)?;
        self.read(&bytes)
    }
}

impl SeriesReader for TsvReader {
    fn name(&self) -> &str {
        if self.config.delimiter == b'\t' {
            "tsv"
        } else {
            "delimited"
        }
    }

    fn read(&self, bytes: &[u8]) -> Result<Vec<Sample>> {
        let text = decode(bytes, self.config.encoding)?;

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.config.delimiter)
            .trim(csv::Trim::Headers)
            .from_reader(text.as_bytes());

        let headers = reader.headers().map_err(csv_error)?.clone();
        let time_idx = column_index(&headers, &self.config.time_column)?;
        let value_idx = column_index(&headers, &self.config.value_column)?;

        let mut samples = Vec::new();
        for result in reader.records() {
            let record = result.map_err(csv_error)?;
            let line = record.position().map(|p| p.line()).unwrap_or_default();

            let raw_time = record.get(time_idx).unwrap_or_default();
            let timestamp = parse_timestamp(raw_time).ok_or_else(|| {
                DataError::at_line(
                    line,
                    format!(
                        "invalid timestamp '{}' in column '{}'",
                        raw_time, self.config.time_column
                    ),
                )
            })?;

            let raw_value = record.get(value_idx).unwrap_or_default();
            let value = parse_value(raw_value).ok_or_else(|| {
                DataError::at_line(
                    line,
                    format!(
                        "invalid number '{}' in column '{}'",
                        raw_value, self.config.value_column
                    ),
                )
            })?;

            samples.push(Sample::new(timestamp, value));
        }

        if samples.is_empty() {
            return Err(DataError::FileParse("no data rows".to_string()));
        }

        tracing::debug!(
            reader = self.name(),
            encoding = %self.config.encoding,
            samples = samples.len(),
            "parsed upload"
        );
        Ok(samples)
    }
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        DataError::FileParse(format!(
            "missing column '{}' (found: {})",
            name,
            headers.iter().collect::<Vec<_>>().join(", ")
        ))
    })
}

/// Parse a value cell. An empty cell is a missing value and reads as NaN.
fn parse_value(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(f64::NAN);
    }
    raw.parse().ok()
}

fn csv_error(err: csv::Error) -> DataError {
    DataError::FileParse(err.to_string())
}
