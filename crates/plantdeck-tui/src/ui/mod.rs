//! Main UI layout and rendering.
//!
//! The layout is a header line, a tab bar, the active tab's content, and a
//! status bar. The blocking alert dialog, when present, draws over
//! everything last.

pub mod theme;
pub mod widgets;

mod camera;
mod control;
mod dashboard;
mod history;
mod settings;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};

use plantdeck_types::Theme;

use crate::app::{App, Tab};
use theme::{BORDER_TYPE, Palette};
use widgets::{draw_alert, hint_line};

/// Draw the complete interface.
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.theme);

    // Light theme needs an explicit background fill.
    if matches!(app.theme, Theme::Light) {
        frame.render_widget(
            Block::default().style(Style::default().bg(palette.bg)),
            frame.area(),
        );
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Length(3), // tab bar
            Constraint::Min(1),    // content
            Constraint::Length(1), // status bar
        ])
        .split(frame.area());

    draw_header(frame, layout[0], app, &palette);
    draw_tab_bar(frame, layout[1], app, &palette);

    match app.tab {
        Tab::Dashboard => dashboard::draw(frame, layout[2], app),
        Tab::History => history::draw(frame, layout[2], app),
        Tab::Control => control::draw(frame, layout[2], app),
        Tab::Camera => camera::draw(frame, layout[2], app),
        Tab::Settings => settings::draw(frame, layout[2], app),
    }

    draw_status_bar(frame, layout[3], app, &palette);

    if let Some(message) = &app.alert {
        draw_alert(frame, message, &palette);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let mut spans = vec![
        Span::styled(
            " plantdeck ",
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.server_url.clone(), palette.muted()),
    ];

    if app.polling {
        spans.push(Span::styled(" LIVE ", Style::default().fg(palette.success)));
    }
    if app.camera_url.is_some() {
        spans.push(Span::styled(" CAM ", Style::default().fg(palette.warning)));
    }
    spans.push(Span::styled(
        format!(" {} ", app.theme),
        palette.muted(),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_tab_bar(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let style = if *tab == app.tab {
                Style::default()
                    .fg(palette.primary)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
            } else {
                palette.muted()
            };
            Line::from(Span::styled(format!(" {} {} ", i + 1, tab.title()), style))
        })
        .collect();

    let selected = Tab::ALL.iter().position(|t| *t == app.tab).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BORDER_TYPE)
                .border_style(palette.border_style()),
        )
        .divider(Span::styled("|", palette.muted()))
        .select(selected);

    frame.render_widget(tabs, area);
}

/// Context-sensitive key hints for the active tab.
fn context_hints(app: &App) -> Vec<(&'static str, &'static str)> {
    let mut hints: Vec<(&'static str, &'static str)> = match app.tab {
        Tab::Dashboard => vec![
            ("p", if app.polling { "pause" } else { "poll" }),
            ("c", "clear"),
        ],
        Tab::History => vec![
            ("s/u", "edit range"),
            ("r", "query"),
            ("x", "clear"),
            ("o", "report url"),
        ],
        Tab::Control => vec![("w/W", "pump"), ("l/L", "light"), ("g/G", "strip")],
        Tab::Camera => vec![
            ("s", "start"),
            ("x", "stop"),
        ],
        Tab::Settings => vec![
            ("r", "reload"),
            ("up/down", "field"),
            ("enter", "edit"),
            ("+/-", "interval"),
            ("b", "save basic"),
            ("a", "save auto"),
        ],
    };
    hints.push(("t", "theme"));
    hints.push(("q", "quit"));
    hints
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App, palette: &Palette) {
    let line = if let Some(status) = &app.status {
        Line::from(Span::styled(
            format!(" {}", status),
            Style::default().fg(palette.text_secondary),
        ))
    } else {
        hint_line(&context_hints(app), palette)
    };
    frame.render_widget(Paragraph::new(line), area);
}
