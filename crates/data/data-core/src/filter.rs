//! Date-range selection over scored rows.

use anomaly_spi::{ScoredSample, ScoredSeries};
use data_spi::{DateRange, ExportRow};

/// Scored samples whose timestamp falls inside `range`, in series order.
pub fn filter_scored<'a>(series: &'a ScoredSeries, range: &DateRange) -> Vec<&'a ScoredSample> {
    series
        .iter()
        .filter(|s| range.contains(&s.timestamp()))
        .collect()
}

/// Export rows for the samples inside `range`.
pub fn filter_rows(series: &ScoredSeries, range: &DateRange) -> Vec<ExportRow> {
    let rows: Vec<ExportRow> = filter_scored(series, range)
        .into_iter()
        .map(ExportRow::from)
        .collect();
    tracing::debug!(%range, total = series.len(), kept = rows.len(), "filtered rows");
    rows
}
