//! Spreadsheet export of result rows.
//!
//! Timestamps are stored as Excel date serials (days since 1899-12-30) with a
//! date-time number format, so they survive a round trip at millisecond
//! resolution.

use std::io::Cursor;
use std::path::Path;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::{DateTime, NaiveDateTime};
use data_api::{ExportConfig, DEFAULT_ANOMALY_COLUMN, DEFAULT_TIME_COLUMN, DEFAULT_VALUE_COLUMN};
use data_spi::{DataError, ExportRow, Result, SeriesExporter};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

/// MIME type of an xlsx workbook.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

const EXCEL_UNIX_EPOCH: f64 = 25569.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Writes `time | value | anomaly` rows into a single-sheet workbook.
#[derive(Debug, Clone, Default)]
pub struct XlsxExporter {
    config: ExportConfig,
}

impl XlsxExporter {
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    fn build(&self, rows: &[ExportRow]) -> std::result::Result<Vec<u8>, XlsxError> {
        let mut workbook = Workbook::new();
        let datetime = Format::new().set_num_format(&self.config.datetime_format);
        let header = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.config.sheet_name)?;
        worksheet.set_column_width(0, 20)?;

        worksheet.write_string_with_format(0, 0, DEFAULT_TIME_COLUMN, &header)?;
        worksheet.write_string_with_format(0, 1, DEFAULT_VALUE_COLUMN, &header)?;
        worksheet.write_string_with_format(0, 2, DEFAULT_ANOMALY_COLUMN, &header)?;

        for (i, row) in rows.iter().enumerate() {
            let r = (i + 1) as u32;
            worksheet.write_number_with_format(r, 0, to_serial(&row.timestamp), &datetime)?;
            if row.value.is_finite() {
                worksheet.write_number(r, 1, row.value)?;
            } else {
                // Excel has no NaN or infinity.
                worksheet.write_string(r, 1, row.value.to_string())?;
            }
            worksheet.write_boolean(r, 2, row.is_anomaly)?;
        }

        workbook.save_to_buffer()
    }
}

impl SeriesExporter for XlsxExporter {
    fn extension(&self) -> &str {
        "xlsx"
    }

    fn content_type(&self) -> &str {
        XLSX_CONTENT_TYPE
    }

    fn export(&self, rows: &[ExportRow]) -> Result<Vec<u8>> {
        let bytes = self
            .build(rows)
            .map_err(|e| DataError::Export(e.to_string()))?;
        tracing::info!(
            rows = rows.len(),
            bytes = bytes.len(),
            sheet = %self.config.sheet_name,
            "exported workbook"
        );
        Ok(bytes)
    }
}

/// Export `rows` and write the document to `path`.
pub fn export_to_path<E>(exporter: &E, rows: &[ExportRow], path: &Path) -> Result<()>
where
    E: SeriesExporter + ?Sized,
{
    let bytes = exporter.export(rows)?;
    std::fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), "wrote export");
    Ok(())
}

/// Read rows back from the first sheet of a workbook produced by
/// [`XlsxExporter`].
pub fn read_xlsx(bytes: &[u8]) -> Result<Vec<ExportRow>> {
    let mut workbook: Xlsx<Cursor<&[u8]>> = open_workbook_from_rs(Cursor::new(bytes))
        .map_err(|e: calamine::XlsxError| DataError::Export(e.to_string()))?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| DataError::Export("workbook has no sheets".to_string()))?;
    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| DataError::Export(e.to_string()))?;

    let mut rows = range.rows();
    match rows.next() {
        Some([Data::String(t), Data::String(v), Data::String(a), ..])
            if t == DEFAULT_TIME_COLUMN
                && v == DEFAULT_VALUE_COLUMN
                && a == DEFAULT_ANOMALY_COLUMN => {}
        _ => return Err(DataError::Export("unexpected header row".to_string())),
    }

    rows.enumerate()
        .map(|(i, cells)| read_row(i + 2, cells))
        .collect()
}

fn read_row(line: usize, cells: &[Data]) -> Result<ExportRow> {
    let cell_error =
        |column: &str| DataError::Export(format!("row {}: invalid '{}' cell", line, column));

    let timestamp = match cells.first() {
        Some(Data::DateTime(dt)) => from_serial(dt.as_f64()),
        Some(Data::Float(f)) => from_serial(*f),
        _ => None,
    }
    .ok_or_else(|| cell_error(DEFAULT_TIME_COLUMN))?;

    let value = match cells.get(1) {
        Some(Data::Float(f)) => Some(*f),
        Some(Data::Int(i)) => Some(*i as f64),
        Some(Data::String(s)) => s.parse::<f64>().ok(),
        _ => None,
    }
    .ok_or_else(|| cell_error(DEFAULT_VALUE_COLUMN))?;

    let is_anomaly = match cells.get(2) {
        Some(Data::Bool(b)) => *b,
        _ => return Err(cell_error(DEFAULT_ANOMALY_COLUMN)),
    };

    Ok(ExportRow::new(timestamp, value, is_anomaly))
}

/// Excel serial date for a timestamp.
pub fn to_serial(timestamp: &NaiveDateTime) -> f64 {
    timestamp.and_utc().timestamp_millis() as f64 / MILLIS_PER_DAY + EXCEL_UNIX_EPOCH
}

/// Timestamp for an Excel serial date, rounded to the millisecond.
pub fn from_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() {
        return None;
    }
    let millis = ((serial - EXCEL_UNIX_EPOCH) * MILLIS_PER_DAY).round() as i64;
    DateTime::from_timestamp_millis(millis).map(|dt| dt.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn ts(day: u32, h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn rows() -> Vec<ExportRow> {
        vec![
            ExportRow::new(ts(1, 0, 0, 0), 10.0, false),
            ExportRow::new(ts(1, 12, 30, 15), 10.5, false),
            ExportRow::new(ts(2, 23, 59, 59), 50.0, true),
        ]
    }

    #[test]
    fn test_serial_known_values() {
        assert_eq!(to_serial(&ts(1, 0, 0, 0)), 45292.0);
        assert_eq!(to_serial(&ts(1, 12, 0, 0)), 45292.5);
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(to_serial(&epoch), 25569.0);
    }

    #[test]
    fn test_serial_preserves_millis() {
        let t = ts(15, 8, 7, 6) + chrono::Duration::milliseconds(789);
        assert_eq!(from_serial(to_serial(&t)), Some(t));
        assert_eq!(from_serial(f64::NAN), None);
    }

    #[test]
    fn test_exporter_metadata() {
        let exporter = XlsxExporter::default();
        assert_eq!(exporter.extension(), "xlsx");
        assert_eq!(exporter.content_type(), XLSX_CONTENT_TYPE);
    }

    #[test]
    fn test_export_produces_zip() {
        let bytes = XlsxExporter::default().export(&rows()).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn test_round_trip_rows() {
        let bytes = XlsxExporter::default().export(&rows()).unwrap();
        assert_eq!(read_xlsx(&bytes).unwrap(), rows());
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let bytes = XlsxExporter::default().export(&[]).unwrap();
        assert!(read_xlsx(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_non_finite_value_round_trip() {
        let input = vec![ExportRow::new(ts(3, 0, 0, 0), f64::NAN, false)];
        let bytes = XlsxExporter::default().export(&input).unwrap();
        let back = read_xlsx(&bytes).unwrap();
        assert!(back[0].value.is_nan());
    }

    #[test]
    fn test_custom_sheet_name() {
        let config = ExportConfig {
            sheet_name: "Results".to_string(),
            ..ExportConfig::default()
        };
        let bytes = XlsxExporter::new(config).export(&rows()).unwrap();
        assert_eq!(read_xlsx(&bytes).unwrap().len(), 3);
    }

    #[test]
    fn test_read_garbage_fails() {
        let err = read_xlsx(b"not a workbook").unwrap_err();
        assert!(matches!(err, DataError::Export(_)));
    }

    #[test]
    fn test_export_to_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("anomaly_detection_results.xlsx");
        export_to_path(&XlsxExporter::default(), &rows(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(read_xlsx(&bytes).unwrap(), rows());
    }

    #[test]
    fn test_export_to_missing_dir_fails() {
        let err = export_to_path(
            &XlsxExporter::default(),
            &rows(),
            Path::new("/no/such/dir/out.xlsx"),
        )
        .unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
