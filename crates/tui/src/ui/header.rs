//! Header bar widget.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

/// Draw the header bar with title.
pub fn draw_header(frame: &mut Frame, area: Rect, _app: &App) {
    let title = Paragraph::new(format!(
        "anomaly v{} - Rolling Z-Score Anomaly Detection",
        env!("CARGO_PKG_VERSION")
    ))
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM));

    frame.render_widget(title, area);
}
