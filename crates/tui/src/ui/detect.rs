//! Controls, chart and anomaly table.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Row, Table},
};
use session::{SessionError, SessionView};

use crate::app::App;
use crate::widgets::{create_anomaly_chart, ChartData};

/// Draw the controls line: file, encoding, threshold and range.
pub fn draw_controls(frame: &mut Frame, area: Rect, app: &App) {
    let session = &app.session;
    let range = session
        .selection()
        .map(|(start, end)| format!("{} .. {}", start, end))
        .unwrap_or_else(|| "-".to_string());

    let text = format!(
        "File: {}    Encoding: {}    Threshold: {:.1}σ    Range: {}",
        session.upload_name().unwrap_or("(none)"),
        session.encoding(),
        session.threshold(),
        range
    );

    let controls = Paragraph::new(text)
        .style(Style::default().fg(Color::White))
        .block(Block::default().borders(Borders::ALL).title(" Detect "));

    frame.render_widget(controls, area);
}

/// Draw the chart of the visible rows.
pub fn draw_chart(frame: &mut Frame, area: Rect, view: &SessionView<'_>) {
    let data = ChartData::from_samples(&view.visible);
    if data.is_empty() {
        let placeholder = Paragraph::new("No data points in the selected range")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Anomaly Detection "));
        frame.render_widget(placeholder, area);
        return;
    }

    let title = format!("Anomaly Detection ({} points)", view.visible.len());
    let chart = create_anomaly_chart(&data, &title);
    frame.render_widget(chart, area);
}

/// Draw the table of anomalies over the whole series.
pub fn draw_anomaly_list(frame: &mut Frame, area: Rect, view: &SessionView<'_>) {
    let visible_rows = area.height.saturating_sub(3) as usize;

    let rows: Vec<Row> = view
        .anomalies
        .iter()
        .take(visible_rows)
        .enumerate()
        .map(|(n, s)| {
            let score = s
                .z_score()
                .map(|z| format!("{:+.2}σ", z))
                .unwrap_or_default();
            Row::new(vec![
                format!("{}", n + 1),
                s.timestamp().to_string(),
                format!("{:.2}", s.value()),
                score,
            ])
        })
        .collect();

    let title = format!(" Anomalies Found: {} ", view.anomalies.len());

    let table = Table::new(
        rows,
        [
            Constraint::Length(5),
            Constraint::Length(21),
            Constraint::Length(14),
            Constraint::Length(10),
        ],
    )
    .header(
        Row::new(vec!["#", "Time", "Value", "Z-Score"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}

/// Draw why there is nothing to show.
pub fn draw_unavailable(frame: &mut Frame, area: Rect, error: &SessionError) {
    let (text, color) = match error {
        SessionError::NoData => (
            "Open a tab-separated file with 'time' and 'value' columns (press [o])".to_string(),
            Color::DarkGray,
        ),
        other => (other.to_string(), Color::Red),
    };

    let placeholder = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).title(" Anomaly Detection "));
    frame.render_widget(placeholder, area);
}
