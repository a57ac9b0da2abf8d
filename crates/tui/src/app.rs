//! Application state management for the TUI.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anomaly::clamp_shell_threshold;
use chrono::NaiveDate;
use session::{Session, SessionEvent, Upload};

/// Threshold change per arrow key press.
pub const THRESHOLD_STEP: f64 = 0.1;

/// Main application state.
pub struct App {
    /// Upload, scoring and range state
    pub session: Session,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Text typed in an input mode
    pub input: String,
    /// Status message with expiry
    pub status_message: Option<(String, Instant)>,
    /// Directory exports are written to
    pub export_dir: PathBuf,
}

impl App {
    pub fn new(session: Session, export_dir: PathBuf) -> Self {
        Self {
            session,
            should_quit: false,
            input_mode: InputMode::Normal,
            input: String::new(),
            status_message: None,
            export_dir,
        }
    }

    /// Set a status message that will be displayed temporarily.
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    /// Clear expired status messages (older than 5 seconds).
    pub fn clear_expired_status(&mut self) {
        if let Some((_, instant)) = &self.status_message {
            if instant.elapsed().as_secs() > 5 {
                self.status_message = None;
            }
        }
    }

    /// Check if a series is loaded.
    pub fn has_data(&self) -> bool {
        !self.session.samples().is_empty()
    }

    /// Enter an input mode with an initial buffer.
    pub fn begin_input(&mut self, mode: InputMode) {
        self.input = match mode {
            InputMode::EditStart => self.selection_text(|(start, _)| start),
            InputMode::EditEnd => self.selection_text(|(_, end)| end),
            InputMode::OpenFile | InputMode::Normal => String::new(),
        };
        self.input_mode = mode;
    }

    pub fn cancel_input(&mut self) {
        self.input_mode = InputMode::Normal;
        self.input.clear();
    }

    /// Apply the typed input for the current mode.
    pub fn submit_input(&mut self) {
        let text = std::mem::take(&mut self.input);
        let mode = std::mem::replace(&mut self.input_mode, InputMode::Normal);
        match mode {
            InputMode::OpenFile => self.open_file(Path::new(text.trim())),
            InputMode::EditStart => self.set_range_bound(&text, true),
            InputMode::EditEnd => self.set_range_bound(&text, false),
            InputMode::Normal => {}
        }
    }

    /// Load a file and score it.
    pub fn open_file(&mut self, path: &Path) {
        let result = Upload::from_path(path)
            .and_then(|upload| self.session.handle(SessionEvent::Uploaded(upload)));
        match result {
            Ok(()) => {
                let count = self.session.samples().len();
                self.set_status(format!("Loaded {} points from {}", count, path.display()));
            }
            Err(e) => self.set_status(format!("Error: {}", e)),
        }
    }

    /// Switch to the next encoding and re-read the current upload.
    pub fn cycle_encoding(&mut self) {
        let next = self.session.encoding().next();
        match self.session.handle(SessionEvent::EncodingChanged(next)) {
            Ok(()) => self.set_status(format!("Encoding: {}", next)),
            Err(e) => self.set_status(format!("Encoding {}: {}", next, e)),
        }
    }

    /// Move the threshold by `delta`, staying inside the shell range.
    pub fn adjust_threshold(&mut self, delta: f64) {
        let current = self.session.threshold();
        let target = clamp_shell_threshold(((current + delta) * 10.0).round() / 10.0);
        if target == current {
            return;
        }
        if let Err(e) = self.session.handle(SessionEvent::ThresholdChanged(target)) {
            self.set_status(format!("Error: {}", e));
        }
    }

    /// Export the visible rows into the export directory.
    pub fn export(&mut self) {
        let rows = self.session.view().map(|v| v.visible.len());
        match self
            .session
            .export_to_dir(&self.export_dir)
            .map(|path| (path, rows.unwrap_or_default()))
        {
            Ok((path, rows)) => {
                self.set_status(format!("Exported {} rows to {}", rows, path.display()))
            }
            Err(e) => self.set_status(format!("Export failed: {}", e)),
        }
    }

    fn set_range_bound(&mut self, text: &str, is_start: bool) {
        let Some((start, end)) = self.session.selection() else {
            self.set_status("No data loaded. Press 'o' to open a file.");
            return;
        };
        let date = match NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d") {
            Ok(date) => date,
            Err(_) => {
                self.set_status(format!("Invalid date '{}', expected YYYY-MM-DD", text.trim()));
                return;
            }
        };
        let (start, end) = if is_start { (date, end) } else { (start, date) };
        match self.session.handle(SessionEvent::RangeChanged { start, end }) {
            Ok(()) => self.set_status(format!("Range: {} .. {}", start, end)),
            Err(e) => self.set_status(format!("Error: {}", e)),
        }
    }

    fn selection_text(&self, pick: impl Fn((NaiveDate, NaiveDate)) -> NaiveDate) -> String {
        self.session
            .selection()
            .map(|s| pick(s).to_string())
            .unwrap_or_default()
    }
}

/// Input mode for the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    OpenFile,
    EditStart,
    EditEnd,
}

impl InputMode {
    pub fn prompt(self) -> &'static str {
        match self {
            InputMode::Normal => "",
            InputMode::OpenFile => "Open file",
            InputMode::EditStart => "Start date",
            InputMode::EditEnd => "End date",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use data::TextEncoding;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn upload() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "time\tvalue").unwrap();
        for day in 1..=10 {
            let value = if day == 8 { 50 } else { 10 };
            writeln!(file, "2024-01-{:02}\t{}", day, value).unwrap();
        }
        file
    }

    fn loaded() -> (App, NamedTempFile) {
        let file = upload();
        let mut app = App::new(Session::default(), std::env::temp_dir());
        app.open_file(file.path());
        (app, file)
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_new_app() {
        let app = App::new(Session::default(), PathBuf::from("."));
        assert!(!app.should_quit);
        assert!(!app.has_data());
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn test_open_file() {
        let (app, _file) = loaded();
        assert!(app.has_data());
        assert!(app.status_message.unwrap().0.starts_with("Loaded 10 points"));
    }

    #[test]
    fn test_open_missing_file_reports_error() {
        let mut app = App::new(Session::default(), PathBuf::from("."));
        app.open_file(Path::new("/no/such/file.tsv"));
        assert!(!app.has_data());
        assert!(app.status_message.unwrap().0.starts_with("Error: I/O error"));
    }

    #[test]
    fn test_threshold_steps_and_clamps() {
        let (mut app, _file) = loaded();
        app.adjust_threshold(-THRESHOLD_STEP);
        assert_eq!(app.session.threshold(), 2.9);

        for _ in 0..100 {
            app.adjust_threshold(THRESHOLD_STEP);
        }
        assert_eq!(app.session.threshold(), 5.0);

        for _ in 0..100 {
            app.adjust_threshold(-THRESHOLD_STEP);
        }
        assert_eq!(app.session.threshold(), 1.0);
        assert_eq!(app.session.view().unwrap().anomalies.len(), 1);
    }

    #[test]
    fn test_cycle_encoding() {
        let (mut app, _file) = loaded();
        app.cycle_encoding();
        assert_eq!(app.session.encoding(), TextEncoding::Utf8.next());
        assert!(app.has_data());
    }

    #[test]
    fn test_edit_start_prefills_and_applies() {
        let (mut app, _file) = loaded();
        app.begin_input(InputMode::EditStart);
        assert_eq!(app.input, "2024-01-01");

        app.input = "2024-01-05".to_string();
        app.submit_input();
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.session.selection(), Some((date(5), date(10))));
        assert_eq!(app.session.view().unwrap().visible.len(), 6);
    }

    #[test]
    fn test_reversed_range_blocks_view() {
        let (mut app, _file) = loaded();
        app.begin_input(InputMode::EditEnd);
        app.input = "2023-12-01".to_string();
        app.submit_input();
        assert!(app.session.view().is_err());
        assert!(app.status_message.unwrap().0.contains("Invalid date range"));
    }

    #[test]
    fn test_bad_date_text() {
        let (mut app, _file) = loaded();
        app.begin_input(InputMode::EditStart);
        app.input = "tomorrow".to_string();
        app.submit_input();
        assert_eq!(app.session.selection(), Some((date(1), date(10))));
        assert!(app.status_message.unwrap().0.starts_with("Invalid date"));
    }

    #[test]
    fn test_edit_without_data() {
        let mut app = App::new(Session::default(), PathBuf::from("."));
        app.begin_input(InputMode::EditEnd);
        assert!(app.input.is_empty());
        app.input = "2024-01-01".to_string();
        app.submit_input();
        assert!(app.status_message.unwrap().0.starts_with("No data loaded"));
    }

    #[test]
    fn test_export_writes_file() {
        let (mut app, _file) = loaded();
        let dir = tempdir().unwrap();
        app.export_dir = dir.path().to_path_buf();
        app.export();
        assert!(dir.path().join("anomaly_detection_results.xlsx").exists());
        assert!(app.status_message.unwrap().0.starts_with("Exported 10 rows"));
    }

    #[test]
    fn test_export_without_data() {
        let mut app = App::new(Session::default(), PathBuf::from("."));
        app.export();
        assert!(app.status_message.unwrap().0.starts_with("Export failed"));
    }
}
