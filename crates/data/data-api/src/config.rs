//! Ingest and export configuration types.

use data_spi::TextEncoding;
use serde::{Deserialize, Serialize};

/// Header of the timestamp column.
pub const DEFAULT_TIME_COLUMN: &str = "time";

/// Header of the value column.
pub const DEFAULT_VALUE_COLUMN: &str = "value";

/// Header of the anomaly flag column in exports.
pub const DEFAULT_ANOMALY_COLUMN: &str = "anomaly";

/// File name offered for the result download.
pub const DEFAULT_EXPORT_FILE_NAME: &str = "anomaly_detection_results.xlsx";

/// Configuration for parsing an uploaded delimited file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Encoding the upload is decoded with
    pub encoding: TextEncoding,
    /// Field separator byte (tab for TSV)
    pub delimiter: u8,
    /// Header of the timestamp column
    pub time_column: String,
    /// Header of the value column
    pub value_column: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            encoding: TextEncoding::Utf8,
            delimiter: b'\t',
            time_column: DEFAULT_TIME_COLUMN.to_string(),
            value_column: DEFAULT_VALUE_COLUMN.to_string(),
        }
    }
}

impl IngestConfig {
    /// Tab-separated upload in the given encoding.
    pub fn tsv(encoding: TextEncoding) -> Self {
        Self {
            encoding,
            ..Self::default()
        }
    }

    /// Comma-separated upload in the given encoding.
    pub fn csv(encoding: TextEncoding) -> Self {
        Self {
            encoding,
            delimiter: b',',
            ..Self::default()
        }
    }
}

/// Builder for IngestConfig.
#[derive(Debug, Default)]
pub struct IngestConfigBuilder {
    encoding: Option<TextEncoding>,
    delimiter: Option<u8>,
    time_column: Option<String>,
    value_column: Option<String>,
}

impl IngestConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the encoding.
    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Set the field separator.
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Set the timestamp column header.
    pub fn time_column(mut self, name: &str) -> Self {
        self.time_column = Some(name.to_string());
        self
    }

    /// Set the value column header.
    pub fn value_column(mut self, name: &str) -> Self {
        self.value_column = Some(name.to_string());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<IngestConfig, &'static str> {
        let defaults = IngestConfig::default();
        let time_column = self.time_column.unwrap_or(defaults.time_column);
        let value_column = self.value_column.unwrap_or(defaults.value_column);
        if time_column.is_empty() || value_column.is_empty() {
            return Err("column names must not be empty");
        }
        if time_column == value_column {
            return Err("time and value columns must differ");
        }
        let delimiter = self.delimiter.unwrap_or(defaults.delimiter);
        if delimiter == b'"' || delimiter == b'\n' || delimiter == b'\r' {
            return Err("delimiter must not be a quote or line break");
        }
        Ok(IngestConfig {
            encoding: self.encoding.unwrap_or(defaults.encoding),
            delimiter,
            time_column,
            value_column,
        })
    }
}

/// Configuration for the result spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Worksheet name
    pub sheet_name: String,
    /// Excel number format applied to the timestamp column
    pub datetime_format: String,
    /// Suggested download file name
    pub file_name: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Sheet1".to_string(),
            datetime_format: "yyyy-mm-dd hh:mm:ss".to_string(),
            file_name: DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}

impl ExportConfig {
    /// Same configuration with another download file name.
    pub fn with_file_name(mut self, file_name: &str) -> Self {
        self.file_name = file_name.to_string();
        self
    }
}
