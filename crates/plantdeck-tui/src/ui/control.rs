//! Control tab: available commands and the verbatim dispatch result.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use super::theme::{BORDER_TYPE, Palette};
use crate::app::App;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(20)])
        .split(area);

    let palette = Palette::for_theme(app.theme);
    draw_commands(frame, layout[0], &palette);
    draw_result(frame, layout[1], app, &palette);
}

fn draw_commands(frame: &mut Frame, area: Rect, palette: &Palette) {
    let commands = [
        ("w", "pump on (configured duration)"),
        ("W", "pump off"),
        ("l", "light on (configured brightness)"),
        ("L", "light off"),
        ("g", "LED strip on (configured mode)"),
        ("G", "LED strip off"),
    ];

    let items: Vec<ListItem> = commands
        .iter()
        .map(|(key, desc)| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {} ", key),
                    Style::default()
                        .fg(palette.primary)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(*desc, Style::default().fg(palette.text_primary)),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Commands ")
            .title_style(palette.title_style())
            .borders(Borders::ALL)
            .border_type(BORDER_TYPE)
            .border_style(palette.border_style()),
    );
    frame.render_widget(list, area);
}

/// The node's response body, exactly as rendered by the dispatcher. No
/// success/failure interpretation happens here.
fn draw_result(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let body = app
        .control_output
        .as_deref()
        .unwrap_or("No command dispatched yet");

    let result = Paragraph::new(body.to_string())
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(palette.text_primary))
        .block(
            Block::default()
                .title(" Result ")
                .title_style(palette.title_style())
                .borders(Borders::ALL)
                .border_type(BORDER_TYPE)
                .border_style(palette.border_style()),
        );
    frame.render_widget(result, area);
}
