//! Basic example demonstrating data crate functionality
//!
//! Run with: cargo run --example basic -p data

use chrono::NaiveDate;
use data::{filter_rows, DateRange, SeriesExporter, SeriesReader, TsvReader, XlsxExporter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Data Crate Example ===\n");

    let upload = "time\tvalue\n\
                  2024-01-01 00:00:00\t10.0\n\
                  2024-01-02 00:00:00\t10.4\n\
                  2024-01-03 00:00:00\t9.8\n\
                  2024-01-04 00:00:00\t10.1\n\
                  2024-01-05 00:00:00\t10.3\n\
                  2024-01-06 00:00:00\t9.9\n\
                  2024-01-07 00:00:00\t31.0\n\
                  2024-01-08 00:00:00\t10.2\n";

    // 1. Parse the upload
    let samples = TsvReader::default().read(upload.as_bytes())?;
    println!("1. Parsed {} samples", samples.len());

    // 2. Score the whole series
    let scored = anomaly::score(&samples, 7, 2.0)?;
    println!("2. Anomalies at indices {:?}", scored.anomaly_indices());

    // 3. Restrict to a date range
    let start = NaiveDate::from_ymd_opt(2024, 1, 5).ok_or("invalid date")?;
    let end = NaiveDate::from_ymd_opt(2024, 1, 8).ok_or("invalid date")?;
    let range = DateRange::new(start, end)?;
    let rows = filter_rows(&scored, &range);
    println!("3. {} rows in {}", rows.len(), range);
    for row in &rows {
        println!("   {}  {:>6.2}  {}", row.timestamp, row.value, row.is_anomaly);
    }

    // 4. Export
    let exporter = XlsxExporter::default();
    let bytes = exporter.export(&rows)?;
    println!(
        "\n4. Workbook: {} bytes, {}",
        bytes.len(),
        exporter.config().file_name
    );

    Ok(())
}
