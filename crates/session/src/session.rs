//! Session state and the change handler.

use std::path::Path;

use anomaly::{
    validate_shell_threshold, AnomalyScorer, RollingConfig, RollingScorer, Sample, ScoredSample,
    ScoredSeries,
};
use chrono::NaiveDate;
use data::{
    filter_scored, DateRange, ExportConfig, ExportRow, IngestConfig, SeriesExporter, SeriesReader,
    TextEncoding, TsvReader, XlsxExporter,
};
use serde::Serialize;

use crate::config::SessionConfig;
use crate::error::{Result, SessionError};

/// Raw uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl Upload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Read a file from disk, named after its final path component.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(data::DataError::from)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, bytes))
    }
}

/// A user-initiated change.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Uploaded(Upload),
    EncodingChanged(TextEncoding),
    ThresholdChanged(f64),
    RangeChanged { start: NaiveDate, end: NaiveDate },
}

/// What the user sees for the current state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionView<'a> {
    /// Flagged samples of the whole series
    pub anomalies: Vec<&'a ScoredSample>,
    /// Samples inside the selected range
    pub visible: Vec<&'a ScoredSample>,
    pub range: DateRange,
    pub threshold: f64,
}

impl SessionView<'_> {
    /// Rows for the export document.
    pub fn export_rows(&self) -> Vec<ExportRow> {
        self.visible.iter().map(|s| ExportRow::from(*s)).collect()
    }
}

/// One interactive review of one uploaded series.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    encoding: TextEncoding,
    threshold: f64,
    upload: Option<Upload>,
    samples: Vec<Sample>,
    scored: Option<ScoredSeries>,
    selection: Option<(NaiveDate, NaiveDate)>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            encoding: config.default_encoding,
            threshold: config.default_threshold,
            config,
            upload: None,
            samples: Vec::new(),
            scored: None,
            selection: None,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Name of the current upload, if any.
    pub fn upload_name(&self) -> Option<&str> {
        self.upload.as_ref().map(|u| u.name.as_str())
    }

    /// Parsed samples of the current upload; empty when parsing failed.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn scored(&self) -> Option<&ScoredSeries> {
        self.scored.as_ref()
    }

    /// Selected `(start, end)` dates, possibly out of order.
    pub fn selection(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.selection
    }

    /// Full date span of the parsed samples.
    pub fn data_span(&self) -> Option<DateRange> {
        DateRange::spanning(&self.samples)
    }

    /// Apply a change and recompute what depends on it.
    ///
    /// On error the session stays usable. A failed parse leaves no samples
    /// behind, so no stale result is shown for the new input.
    pub fn handle(&mut self, event: SessionEvent) -> Result<()> {
        match event {
            SessionEvent::Uploaded(upload) => {
                tracing::info!(name = %upload.name, bytes = upload.bytes.len(), "upload received");
                self.upload = Some(upload);
                self.reparse()
            }
            SessionEvent::EncodingChanged(encoding) => {
                self.encoding = encoding;
                if self.upload.is_some() {
                    self.reparse()
                } else {
                    Ok(())
                }
            }
            SessionEvent::ThresholdChanged(threshold) => {
                validate_shell_threshold(threshold)?;
                self.threshold = threshold;
                if self.samples.is_empty() {
                    Ok(())
                } else {
                    self.rescore()
                }
            }
            SessionEvent::RangeChanged { start, end } => {
                self.selection = Some((start, end));
                DateRange::new(start, end)?;
                tracing::debug!(%start, %end, "range selected");
                Ok(())
            }
        }
    }

    /// Current view, or why there is none.
    pub fn view(&self) -> Result<SessionView<'_>> {
        let scored = self.scored.as_ref().ok_or(SessionError::NoData)?;
        let (start, end) = self.selection.ok_or(SessionError::NoData)?;
        let range = DateRange::new(start, end)?;
        Ok(SessionView {
            anomalies: scored.anomalies().collect(),
            visible: filter_scored(scored, &range),
            range,
            threshold: self.threshold,
        })
    }

    /// Spreadsheet bytes of the visible rows.
    pub fn export(&self) -> Result<Vec<u8>> {
        let rows = self.view()?.export_rows();
        let bytes = self.exporter().export(&rows)?;
        Ok(bytes)
    }

    /// Export into `dir` under the configured file name, returning the path.
    pub fn export_to_dir(&self, dir: &Path) -> Result<std::path::PathBuf> {
        let path = dir.join(&self.config.export_file_name);
        let rows = self.view()?.export_rows();
        data::export_to_path(&self.exporter(), &rows, &path)?;
        Ok(path)
    }

    fn exporter(&self) -> XlsxExporter {
        XlsxExporter::new(ExportConfig::default().with_file_name(&self.config.export_file_name))
    }

    fn reparse(&mut self) -> Result<()> {
        self.samples.clear();
        self.scored = None;
        self.selection = None;

        let Some(upload) = self.upload.as_ref() else {
            return Ok(());
        };

        let reader = TsvReader::new(IngestConfig::tsv(self.encoding));
        match reader.read(&upload.bytes) {
            Ok(samples) => {
                self.selection = DateRange::spanning(&samples).map(|r| (r.start(), r.end()));
                self.samples = samples;
                self.rescore()
            }
            Err(e) => {
                tracing::warn!(name = %upload.name, encoding = %self.encoding, error = %e, "upload rejected");
                Err(e.into())
            }
        }
    }

    fn rescore(&mut self) -> Result<()> {
        let scorer = RollingScorer::new(RollingConfig::new(self.config.window_size, self.threshold))?;
        let scored = scorer.score(&self.samples)?;
        tracing::info!(
            samples = scored.len(),
            anomalies = scored.anomaly_count(),
            threshold = self.threshold,
            "series scored"
        );
        self.scored = Some(scored);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::DataError;

    const UPLOAD: &str = "time\tvalue\n\
        2024-01-01\t10\n\
        2024-01-02\t10\n\
        2024-01-03\t10\n\
        2024-01-04\t10\n\
        2024-01-05\t10\n\
        2024-01-06\t10\n\
        2024-01-07\t10\n\
        2024-01-08\t50\n\
        2024-01-09\t10\n";

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn loaded() -> Session {
        let mut session = Session::default();
        session
            .handle(SessionEvent::Uploaded(Upload::new("data.tsv", UPLOAD.as_bytes().to_vec())))
            .unwrap();
        session
    }

    #[test]
    fn test_new_session_has_no_view() {
        let session = Session::default();
        assert_eq!(session.threshold(), 3.0);
        assert_eq!(session.encoding(), TextEncoding::Utf8);
        assert_eq!(session.view().unwrap_err(), SessionError::NoData);
        assert_eq!(session.export().unwrap_err(), SessionError::NoData);
    }

    #[test]
    fn test_upload_scores_and_selects_full_span() {
        let session = loaded();
        assert_eq!(session.upload_name(), Some("data.tsv"));
        assert_eq!(session.samples().len(), 9);

        let view = session.view().unwrap();
        assert_eq!(view.range, DateRange::new(date(1), date(9)).unwrap());
        assert_eq!(view.visible.len(), 9);
        // z of the spike is 6/sqrt(7), below the default threshold
        assert!(view.anomalies.is_empty());
    }

    #[test]
    fn test_threshold_change_rescores() {
        let mut session = loaded();
        session.handle(SessionEvent::ThresholdChanged(2.0)).unwrap();
        let view = session.view().unwrap();
        assert_eq!(view.threshold, 2.0);
        assert_eq!(view.anomalies.len(), 1);
        assert_eq!(view.anomalies[0].timestamp().date(), date(8));
    }

    #[test]
    fn test_threshold_outside_range_rejected() {
        let mut session = loaded();
        let err = session.handle(SessionEvent::ThresholdChanged(0.5)).unwrap_err();
        assert!(matches!(err, SessionError::Anomaly(_)));
        assert_eq!(session.threshold(), 3.0);
        assert!(session.view().is_ok());
    }

    #[test]
    fn test_threshold_change_keeps_range() {
        let mut session = loaded();
        session
            .handle(SessionEvent::RangeChanged { start: date(3), end: date(5) })
            .unwrap();
        session.handle(SessionEvent::ThresholdChanged(4.0)).unwrap();
        assert_eq!(session.view().unwrap().visible.len(), 3);
    }

    #[test]
    fn test_range_filters_visible_not_anomalies() {
        let mut session = loaded();
        session.handle(SessionEvent::ThresholdChanged(2.0)).unwrap();
        session
            .handle(SessionEvent::RangeChanged { start: date(1), end: date(3) })
            .unwrap();
        let view = session.view().unwrap();
        assert_eq!(view.visible.len(), 3);
        assert_eq!(view.anomalies.len(), 1);
    }

    #[test]
    fn test_reversed_range_blocks_view_until_fixed() {
        let mut session = loaded();
        let err = session
            .handle(SessionEvent::RangeChanged { start: date(5), end: date(2) })
            .unwrap_err();
        assert!(matches!(
            err,
            SessionError::Data(DataError::InvalidDateRange { .. })
        ));
        assert!(session.view().is_err());
        assert!(session.export().is_err());

        session
            .handle(SessionEvent::RangeChanged { start: date(2), end: date(5) })
            .unwrap();
        assert_eq!(session.view().unwrap().visible.len(), 4);
    }

    #[test]
    fn test_failed_upload_clears_previous_result() {
        let mut session = loaded();
        let err = session
            .handle(SessionEvent::Uploaded(Upload::new("bad.tsv", b"time,value\n1,2\n".to_vec())))
            .unwrap_err();
        assert!(matches!(err, SessionError::Data(DataError::FileParse(_))));
        assert!(session.samples().is_empty());
        assert_eq!(session.view().unwrap_err(), SessionError::NoData);

        session
            .handle(SessionEvent::Uploaded(Upload::new("data.tsv", UPLOAD.as_bytes().to_vec())))
            .unwrap();
        assert!(session.view().is_ok());
    }

    #[test]
    fn test_encoding_change_reparses() {
        let mut bytes = b"time\tvalue\tnote\n".to_vec();
        bytes.extend_from_slice(b"2024-01-01\t1\tcaf\xE9\n");

        let mut session = Session::default();
        assert!(session
            .handle(SessionEvent::Uploaded(Upload::new("latin.tsv", bytes)))
            .is_err());
        assert!(session.samples().is_empty());

        session
            .handle(SessionEvent::EncodingChanged(TextEncoding::Latin1))
            .unwrap();
        assert_eq!(session.samples().len(), 1);
        assert_eq!(session.upload_name(), Some("latin.tsv"));
    }

    #[test]
    fn test_encoding_change_without_upload() {
        let mut session = Session::default();
        session
            .handle(SessionEvent::EncodingChanged(TextEncoding::Ascii))
            .unwrap();
        assert_eq!(session.encoding(), TextEncoding::Ascii);
        assert_eq!(session.view().unwrap_err(), SessionError::NoData);
    }

    #[test]
    fn test_export_visible_rows() {
        let mut session = loaded();
        session
            .handle(SessionEvent::RangeChanged { start: date(7), end: date(9) })
            .unwrap();
        let bytes = session.export().unwrap();
        let rows = data::read_xlsx(&bytes).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].value, 50.0);
    }

    #[test]
    fn test_view_serializes() {
        let session = loaded();
        let json = serde_json::to_value(session.view().unwrap()).unwrap();
        assert_eq!(json["visible"].as_array().unwrap().len(), 9);
        assert_eq!(json["threshold"], 3.0);
    }
}
