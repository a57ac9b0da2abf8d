//! End-to-end tests for data crate
//!
//! Tests the upload, score, filter and export workflow through the public API.

use anomaly::{AnomalyScorer, RollingConfig, RollingScorer};
use chrono::NaiveDate;
use data::{
    export_to_path, filter_rows, filter_scored, read_xlsx, DateRange, ExportRow, SeriesExporter,
    SeriesReader, TextEncoding, TsvReader, XlsxExporter,
};
use tempfile::tempdir;

/// Thirty daily readings alternating 10/11 with a spike on 2024-01-21.
fn upload() -> String {
    let mut text = String::from("time\tvalue\n");
    for day in 0..30 {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(day);
        let value = if day == 20 {
            100.0
        } else if day % 2 == 0 {
            10.0
        } else {
            11.0
        };
        text.push_str(&format!("{} 09:00:00\t{}\n", date, value));
    }
    text
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
}

#[test]
fn e2e_upload_score_filter_export() {
    let samples = TsvReader::default().read(upload().as_bytes()).unwrap();
    assert_eq!(samples.len(), 30);

    let scorer = RollingScorer::new(RollingConfig::new(7, 2.0)).unwrap();
    let scored = scorer.score(&samples).unwrap();
    assert_eq!(scored.anomaly_indices(), vec![20]);

    let range = DateRange::new(date(15), date(25)).unwrap();
    let rows = filter_rows(&scored, &range);
    assert_eq!(rows.len(), 11);
    assert_eq!(rows.iter().filter(|r| r.is_anomaly).count(), 1);

    let bytes = XlsxExporter::default().export(&rows).unwrap();
    let back = read_xlsx(&bytes).unwrap();
    assert_eq!(back, rows);
    assert_eq!(back[6].timestamp.date(), date(21));
    assert!(back[6].is_anomaly);
}

#[test]
fn e2e_default_range_covers_whole_upload() {
    let samples = TsvReader::default().read(upload().as_bytes()).unwrap();
    let scored = anomaly::score(&samples, 7, 2.0).unwrap();

    let range = DateRange::spanning(&samples).unwrap();
    assert_eq!(range.start(), date(1));
    assert_eq!(range.end(), date(30));
    assert_eq!(filter_scored(&scored, &range).len(), samples.len());
}

#[test]
fn e2e_range_without_rows_exports_header_only() {
    let samples = TsvReader::default().read(upload().as_bytes()).unwrap();
    let scored = anomaly::score(&samples, 7, 2.0).unwrap();

    let range = DateRange::new(
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
    )
    .unwrap();
    let rows = filter_rows(&scored, &range);
    assert!(rows.is_empty());

    let bytes = XlsxExporter::default().export(&rows).unwrap();
    assert!(read_xlsx(&bytes).unwrap().is_empty());
}

#[test]
fn e2e_threshold_change_keeps_filter_and_upload() {
    let samples = TsvReader::default().read(upload().as_bytes()).unwrap();
    let range = DateRange::new(date(15), date(25)).unwrap();

    let strict = filter_rows(&anomaly::score(&samples, 7, 3.0).unwrap(), &range);
    let loose = filter_rows(&anomaly::score(&samples, 7, 1.0).unwrap(), &range);

    assert_eq!(strict.len(), loose.len());
    assert_eq!(strict.iter().filter(|r| r.is_anomaly).count(), 0);
    assert!(loose.iter().filter(|r| r.is_anomaly).count() >= 1);
}

#[test]
fn e2e_windows_1252_upload() {
    let mut bytes = b"time\tvalue\tunit\n".to_vec();
    bytes.extend_from_slice(b"2024-01-01\t1.5\t\x80\n");
    bytes.extend_from_slice(b"2024-01-02\t2.5\t\x80\n");

    assert!(TsvReader::with_encoding(TextEncoding::Utf8).read(&bytes).is_err());
    let samples = TsvReader::with_encoding(TextEncoding::Windows1252)
        .read(&bytes)
        .unwrap();
    assert_eq!(samples.len(), 2);
}

#[test]
fn e2e_export_file_on_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("anomaly_detection_results.xlsx");
    let rows = vec![
        ExportRow::new(date(1).and_hms_opt(0, 0, 0).unwrap(), 1.0, false),
        ExportRow::new(date(2).and_hms_opt(0, 0, 0).unwrap(), 9.0, true),
    ];

    export_to_path(&XlsxExporter::default(), &rows, &path).unwrap();
    let back = read_xlsx(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(back, rows);
}
