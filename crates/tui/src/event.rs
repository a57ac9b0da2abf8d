//! Event handling for the TUI.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

use crate::app::{App, InputMode, THRESHOLD_STEP};

/// Handle keyboard events.
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Global shortcuts (work in all modes)
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true;
            return;
        }
        KeyCode::Char('q') if app.input_mode == InputMode::Normal => {
            app.should_quit = true;
            return;
        }
        _ => {}
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::OpenFile | InputMode::EditStart | InputMode::EditEnd => {
            handle_input_mode(app, key)
        }
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('o') => {
            app.begin_input(InputMode::OpenFile);
            app.set_status("Enter file path to load...");
        }
        KeyCode::Char('e') => app.cycle_encoding(),
        KeyCode::Up | KeyCode::Char('k') => app.adjust_threshold(THRESHOLD_STEP),
        KeyCode::Down | KeyCode::Char('j') => app.adjust_threshold(-THRESHOLD_STEP),
        KeyCode::Char('s') => requires_data(app, |app| app.begin_input(InputMode::EditStart)),
        KeyCode::Char('d') => requires_data(app, |app| app.begin_input(InputMode::EditEnd)),
        KeyCode::Char('x') => requires_data(app, App::export),
        _ => {}
    }
}

fn requires_data(app: &mut App, action: impl FnOnce(&mut App)) {
    if app.has_data() {
        action(app);
    } else {
        app.set_status("No data loaded. Press 'o' to open a file.");
    }
}

fn handle_input_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.cancel_input();
            app.set_status("Cancelled.");
        }
        KeyCode::Enter => app.submit_input(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => app.input.push(c),
        _ => {}
    }
}

/// Poll for events with a timeout.
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use session::Session;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn new_app() -> App {
        App::new(Session::default(), PathBuf::from("."))
    }

    fn upload() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "time\tvalue").unwrap();
        for day in 1..=9 {
            writeln!(file, "2024-02-{:02}\t{}", day, day).unwrap();
        }
        file
    }

    #[test]
    fn test_quit_keys() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);

        let mut app = new_app();
        handle_key_event(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_q_is_text_while_typing() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('o'));
        assert_eq!(app.input_mode, InputMode::OpenFile);
        type_text(&mut app, "q.tsv");
        assert!(!app.should_quit);
        assert_eq!(app.input, "q.tsv");

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input, "q.ts");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert!(app.input.is_empty());
    }

    #[test]
    fn test_open_via_keys() {
        let file = upload();
        let mut app = new_app();
        press(&mut app, KeyCode::Char('o'));
        type_text(&mut app, &file.path().display().to_string());
        press(&mut app, KeyCode::Enter);
        assert!(app.has_data());
        assert_eq!(app.session.samples().len(), 9);
    }

    #[test]
    fn test_threshold_keys() {
        let mut app = new_app();
        press(&mut app, KeyCode::Up);
        assert_eq!(app.session.threshold(), 3.1);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        assert_eq!(app.session.threshold(), 2.9);
    }

    #[test]
    fn test_encoding_key() {
        let mut app = new_app();
        let before = app.session.encoding();
        press(&mut app, KeyCode::Char('e'));
        assert_eq!(app.session.encoding(), before.next());
    }

    #[test]
    fn test_range_keys_need_data() {
        let mut app = new_app();
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.input_mode, InputMode::Normal);
        press(&mut app, KeyCode::Char('x'));
        assert!(app.status_message.unwrap().0.starts_with("No data loaded"));
    }

    #[test]
    fn test_edit_end_via_keys() {
        let file = upload();
        let mut app = new_app();
        app.open_file(file.path());

        press(&mut app, KeyCode::Char('d'));
        assert_eq!(app.input_mode, InputMode::EditEnd);
        for _ in 0..2 {
            press(&mut app, KeyCode::Backspace);
        }
        type_text(&mut app, "04");
        press(&mut app, KeyCode::Enter);

        let view = app.session.view().unwrap();
        assert_eq!(view.visible.len(), 4);
    }
}
