//! Live dashboard: metric cards plus the rolling telemetry chart.

use ratatui::prelude::*;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType};

use plantdeck_client::Metric;
use plantdeck_types::{SensorReading, format_metric};

use super::theme::{BORDER_TYPE, Palette};
use super::widgets::metric_card;
use crate::app::App;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // metric cards
            Constraint::Min(5),    // chart
        ])
        .split(area);

    let palette = Palette::for_theme(app.theme);
    draw_cards(frame, layout[0], app.latest.as_ref(), &palette);

    // Short lock: copy the points out, then render.
    let chart_data: Vec<(Metric, Vec<(f64, f64)>)> = {
        let series = app.series.lock().expect("telemetry series lock poisoned");
        Metric::ALL
            .iter()
            .map(|m| (*m, series.chart_points(*m)))
            .collect()
    };
    draw_chart(frame, layout[1], &chart_data, app, &palette);
}

/// One card per displayed metric; absent values render as the placeholder,
/// never as zero.
fn draw_cards(frame: &mut Frame, area: Rect, latest: Option<&SensorReading>, palette: &Palette) {
    let cells = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 6); 6])
        .split(area);

    let values = [
        ("Temp °C", latest.and_then(|r| r.temperature_c)),
        ("Humidity %", latest.and_then(|r| r.humidity_pct)),
        ("Light lux", latest.and_then(|r| r.light_lux)),
        ("Soil %", latest.and_then(|r| r.soil_moisture_pct)),
        ("eCO2 ppm", latest.and_then(|r| r.eco2_ppm)),
        ("TVOC ppb", latest.and_then(|r| r.tvoc_ppb)),
    ];

    for (i, (title, value)) in values.iter().enumerate() {
        frame.render_widget(metric_card(title, format_metric(*value), palette), cells[i]);
    }
}

fn metric_color(metric: Metric, palette: &Palette) -> Color {
    match metric {
        Metric::Temperature => palette.danger,
        Metric::Humidity => Color::Rgb(96, 165, 250), // blue-400
        Metric::Light => palette.warning,
        Metric::Soil => palette.success,
    }
}

fn draw_chart(
    frame: &mut Frame,
    area: Rect,
    chart_data: &[(Metric, Vec<(f64, f64)>)],
    app: &App,
    palette: &Palette,
) {
    let datasets: Vec<Dataset> = chart_data
        .iter()
        .filter(|(_, points)| !points.is_empty())
        .map(|(metric, points)| {
            Dataset::default()
                .name(metric.label())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(metric_color(*metric, palette)))
                .data(points)
        })
        .collect();

    let (y_min, y_max) = value_bounds(chart_data);
    let x_max = app
        .series
        .lock()
        .map(|s| s.capacity() as f64)
        .unwrap_or(60.0);

    let status = if app.polling { "polling" } else { "paused" };
    let last = app
        .series
        .lock()
        .ok()
        .and_then(|s| s.labels().last().map(String::from));
    let title = match last {
        Some(label) => format!(" Telemetry ({status}, last {label}) "),
        None => format!(" Telemetry ({status}) "),
    };
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(title)
                .title_style(palette.title_style())
                .borders(Borders::ALL)
                .border_type(BORDER_TYPE)
                .border_style(palette.border_style()),
        )
        .x_axis(
            Axis::default()
                .bounds([0.0, x_max])
                .style(palette.muted()),
        )
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .labels([format!("{y_min:.0}"), format!("{y_max:.0}")])
                .style(palette.muted()),
        );

    frame.render_widget(chart, area);
}

/// Y-axis bounds across every visible dataset, padded slightly so lines do
/// not hug the frame.
fn value_bounds(chart_data: &[(Metric, Vec<(f64, f64)>)]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (_, points) in chart_data {
        for (_, y) in points {
            min = min.min(*y);
            max = max.max(*y);
        }
    }
    if min > max {
        return (0.0, 100.0);
    }
    let pad = ((max - min) * 0.1).max(1.0);
    (min - pad, max + pad)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_bounds_empty_defaults() {
        assert_eq!(value_bounds(&[]), (0.0, 100.0));
        assert_eq!(value_bounds(&[(Metric::Light, vec![])]), (0.0, 100.0));
    }

    #[test]
    fn test_value_bounds_pads_data() {
        let data = vec![(Metric::Temperature, vec![(0.0, 10.0), (1.0, 20.0)])];
        let (min, max) = value_bounds(&data);
        assert!(min < 10.0);
        assert!(max > 20.0);
    }
}
