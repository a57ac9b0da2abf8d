//! Main layout for the TUI.

use ratatui::prelude::*;

use super::detect::{draw_anomaly_list, draw_chart, draw_controls, draw_unavailable};
use super::footer::draw_footer;
use super::header::draw_header;
use crate::app::App;

/// Draw the main UI layout.
pub fn draw_ui(frame: &mut Frame, app: &App) {
    let size = frame.area();

    // Create main layout: header, controls, content, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(3), // Controls
            Constraint::Min(10),   // Content
            Constraint::Length(2), // Footer
        ])
        .split(size);

    draw_header(frame, chunks[0], app);
    draw_controls(frame, chunks[1], app);

    match app.session.view() {
        Ok(view) => {
            let content = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(8),     // Chart
                    Constraint::Length(10), // Anomaly list
                ])
                .split(chunks[2]);
            draw_chart(frame, content[0], &view);
            draw_anomaly_list(frame, content[1], &view);
        }
        Err(e) => draw_unavailable(frame, chunks[2], &e),
    }

    draw_footer(frame, chunks[3], app);
}
