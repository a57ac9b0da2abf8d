//! Chart widget for the scored series.

use chrono::{DateTime, NaiveDateTime};
use ratatui::{
    prelude::*,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
};

use anomaly::ScoredSample;

/// Plot points for one frame, x in seconds since the epoch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub series: Vec<(f64, f64)>,
    pub anomalies: Vec<(f64, f64)>,
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
}

impl ChartData {
    /// Collect points from the visible samples; non-finite values are skipped.
    pub fn from_samples(samples: &[&ScoredSample]) -> Self {
        let series: Vec<(f64, f64)> = samples
            .iter()
            .filter(|s| s.value().is_finite())
            .map(|s| (to_x(&s.timestamp()), s.value()))
            .collect();
        let anomalies: Vec<(f64, f64)> = samples
            .iter()
            .filter(|s| s.is_anomaly && s.value().is_finite())
            .map(|s| (to_x(&s.timestamp()), s.value()))
            .collect();

        let x_bounds = padded(series.iter().map(|p| p.0), 0.0);
        let y_bounds = padded(series.iter().map(|p| p.1), 0.05);

        Self {
            series,
            anomalies,
            x_bounds,
            y_bounds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

fn to_x(timestamp: &NaiveDateTime) -> f64 {
    timestamp.and_utc().timestamp() as f64
}

fn x_label(x: f64) -> String {
    DateTime::from_timestamp(x as i64, 0)
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Min and max widened by `margin` of the span; a flat span is widened by 1.
fn padded(values: impl Iterator<Item = f64>, margin: f64) -> [f64; 2] {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    if hi - lo <= f64::EPSILON {
        return [lo - 1.0, hi + 1.0];
    }
    let pad = (hi - lo) * margin;
    [lo - pad, hi + pad]
}

/// Create an anomaly chart with the series line and red anomaly markers.
pub fn create_anomaly_chart<'a>(data: &'a ChartData, title: &'a str) -> Chart<'a> {
    let datasets = vec![
        Dataset::default()
            .name("Value")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Cyan))
            .data(&data.series),
        Dataset::default()
            .name("Anomaly")
            .marker(Marker::Block)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Red))
            .data(&data.anomalies),
    ];

    let [x_min, x_max] = data.x_bounds;
    let [y_min, y_max] = data.y_bounds;

    Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", title)),
        )
        .x_axis(
            Axis::default()
                .title("Time")
                .style(Style::default().fg(Color::Gray))
                .bounds([x_min, x_max])
                .labels(vec![
                    Span::raw(x_label(x_min)),
                    Span::raw(x_label((x_min + x_max) / 2.0)),
                    Span::raw(x_label(x_max)),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Value")
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{:.1}", y_min)),
                    Span::raw(format!("{:.1}", (y_min + y_max) / 2.0)),
                    Span::raw(format!("{:.1}", y_max)),
                ]),
        )
}
