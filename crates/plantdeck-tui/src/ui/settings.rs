//! Settings tab: the validated node configuration plus any repairs applied
//! while loading it.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use super::theme::{BORDER_TYPE, Palette};
use crate::app::{App, EditField, SettingsField};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let palette = Palette::for_theme(app.theme);

    let Some(loaded) = &app.settings else {
        let empty = Paragraph::new("Press 'r' to load settings from the node.")
            .style(palette.muted())
            .block(bordered(" Settings ", &palette));
        frame.render_widget(empty, area);
        return;
    };

    let corrections_height = if loaded.corrections.is_empty() {
        0
    } else {
        loaded.corrections.len() as u16 + 2
    };
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(10), Constraint::Length(corrections_height)])
        .split(area);

    draw_config(frame, layout[0], app, &palette);
    if !loaded.corrections.is_empty() {
        draw_corrections(frame, layout[1], app, &palette);
    }
}

fn bordered(title: &'static str, palette: &Palette) -> Block<'static> {
    Block::default()
        .title(title)
        .title_style(palette.title_style())
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(palette.border_style())
}

fn draw_config(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let Some(loaded) = &app.settings else { return };
    let config = &loaded.config;

    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {label:<26}"), palette.muted()),
            Span::styled(value, Style::default().fg(palette.text_primary)),
        ])
    };

    let edited = if app.log_interval_input != config.log_interval_min {
        format!("{} min (edited, 'b' saves)", app.log_interval_input)
    } else {
        format!("{} min", config.log_interval_min)
    };

    let mut lines = vec![
        row("theme", format!("{} (active: {})", config.theme, app.theme)),
        row("log interval", edited),
        Line::default(),
        Line::from(Span::styled(
            "  automation ('a' saves the whole form)",
            palette.muted(),
        )),
    ];

    let selected = SettingsField::ALL[app.settings_cursor];
    for field in SettingsField::ALL {
        lines.push(form_row(app, field, field == selected, palette));
    }

    let body = Paragraph::new(lines).block(bordered(" Settings ", palette));
    frame.render_widget(body, area);
}

/// One editable automation row: cursor marker, label, raw form text.
fn form_row<'a>(app: &'a App, field: SettingsField, selected: bool, palette: &Palette) -> Line<'a> {
    let editing = app.editing == Some(EditField::Setting(field));
    let marker = if selected { "> " } else { "  " };
    let value_style = if editing {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else if selected {
        Style::default().fg(palette.primary)
    } else {
        Style::default().fg(palette.text_primary)
    };

    let text = app.auto_field(field);
    let value = if text.is_empty() && !editing {
        "(empty)".to_string()
    } else {
        text.to_string()
    };

    Line::from(vec![
        Span::styled(format!("{marker}{:<26}", field.label()), palette.muted()),
        Span::styled(value, value_style),
    ])
}

fn draw_corrections(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let Some(loaded) = &app.settings else { return };

    let items: Vec<ListItem> = loaded
        .corrections
        .iter()
        .map(|c| {
            ListItem::new(Line::from(Span::styled(
                format!(" {}", c),
                Style::default().fg(palette.warning),
            )))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Repairs applied on load ")
            .title_style(
                Style::default()
                    .fg(palette.warning)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BORDER_TYPE)
            .border_style(Style::default().fg(palette.warning)),
    );
    frame.render_widget(list, area);
}
