//! History tab: range filter inputs and the record table.

use ratatui::prelude::*;
use ratatui::widgets::{
    Axis, Block, Borders, Cell, Chart, Dataset, GraphType, Paragraph, Row, Table,
};

use plantdeck_types::{HistoryRecord, format_metric};

use super::theme::{BORDER_TYPE, Palette};
use crate::app::{App, EditField, RangeField};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // filter inputs
            Constraint::Percentage(40), // chart
            Constraint::Min(3),         // table
        ])
        .split(area);

    let palette = Palette::for_theme(app.theme);
    draw_filter(frame, layout[0], app, &palette);
    draw_chart(frame, layout[1], app, &palette);
    draw_table(frame, layout[2], app, &palette);
}

/// Indexed chart points for one record field, skipping absent values.
fn record_points(
    records: &[HistoryRecord],
    value: impl Fn(&HistoryRecord) -> Option<f64>,
) -> Vec<(f64, f64)> {
    records
        .iter()
        .enumerate()
        .filter_map(|(i, r)| value(r).map(|v| (i as f64, v)))
        .collect()
}

/// Chart over the queried records. Rebuilt from `app.history` every frame,
/// so a new query replaces it wholesale along with the table.
fn draw_chart(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let series: Vec<(&str, Color, Vec<(f64, f64)>)> = vec![
        (
            "Temp °C",
            palette.danger,
            record_points(&app.history, |r| r.temperature_c),
        ),
        (
            "Humidity %",
            Color::Rgb(96, 165, 250),
            record_points(&app.history, |r| r.humidity_pct),
        ),
        (
            "Light lux",
            palette.warning,
            record_points(&app.history, |r| r.light_lux),
        ),
        (
            "Soil %",
            palette.success,
            record_points(&app.history, |r| r.soil_moisture_pct),
        ),
    ];

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for (_, _, points) in &series {
        for (_, y) in points {
            y_min = y_min.min(*y);
            y_max = y_max.max(*y);
        }
    }
    if y_min > y_max {
        (y_min, y_max) = (0.0, 100.0);
    } else {
        let pad = ((y_max - y_min) * 0.1).max(1.0);
        y_min -= pad;
        y_max += pad;
    }

    let datasets: Vec<Dataset> = series
        .iter()
        .filter(|(_, _, points)| !points.is_empty())
        .map(|(name, color, points)| {
            Dataset::default()
                .name(*name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(*color))
                .data(points)
        })
        .collect();

    let x_max = (app.history.len().max(1) - 1).max(1) as f64;
    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(" Trend ")
                .title_style(palette.title_style())
                .borders(Borders::ALL)
                .border_type(BORDER_TYPE)
                .border_style(palette.border_style()),
        )
        .x_axis(Axis::default().bounds([0.0, x_max]).style(palette.muted()))
        .y_axis(
            Axis::default()
                .bounds([y_min, y_max])
                .labels([format!("{y_min:.0}"), format!("{y_max:.0}")])
                .style(palette.muted()),
        );
    frame.render_widget(chart, area);
}

fn draw_filter(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let field_style = |field: RangeField| {
        if app.editing == Some(EditField::Range(field)) {
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(palette.text_primary)
        }
    };
    let shown = |input: &str| {
        if input.is_empty() {
            "(all)".to_string()
        } else {
            input.to_string()
        }
    };

    let line = Line::from(vec![
        Span::styled("since: ", palette.muted()),
        Span::styled(shown(&app.since_input), field_style(RangeField::Since)),
        Span::styled("   until: ", palette.muted()),
        Span::styled(shown(&app.until_input), field_style(RangeField::Until)),
    ]);

    let filter = Paragraph::new(line).block(
        Block::default()
            .title(" Range ")
            .title_style(palette.title_style())
            .borders(Borders::ALL)
            .border_type(BORDER_TYPE)
            .border_style(palette.border_style()),
    );
    frame.render_widget(filter, area);
}

fn draw_table(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let header = Row::new(
        ["Time", "Temp", "Hum", "Light", "Soil", "eCO2", "TVOC"]
            .into_iter()
            .map(Cell::from),
    )
    .style(
        Style::default()
            .fg(palette.text_secondary)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .history
        .iter()
        .map(|record| {
            Row::new(vec![
                Cell::from(record.time.clone()),
                Cell::from(format_metric(record.temperature_c)),
                Cell::from(format_metric(record.humidity_pct)),
                Cell::from(format_metric(record.light_lux)),
                Cell::from(format_metric(record.soil_moisture_pct)),
                Cell::from(format_metric(record.eco2_ppm)),
                Cell::from(format_metric(record.tvoc_ppb)),
            ])
            .style(Style::default().fg(palette.text_primary))
        })
        .collect();

    let title = format!(" History ({} rows) ", app.history.len());
    let widths = [
        Constraint::Length(20),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
    ];
    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .title(title)
            .title_style(palette.title_style())
            .borders(Borders::ALL)
            .border_type(BORDER_TYPE)
            .border_style(palette.border_style()),
    );
    frame.render_widget(table, area);
}
