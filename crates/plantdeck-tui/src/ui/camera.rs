//! Camera tab: stream state and the attachable feed URL.
//!
//! A terminal cannot embed an MJPEG stream, so this tab shows the live feed
//! URL (already cache-busted) for an external viewer and tracks whether the
//! node's camera is running.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::theme::{BORDER_TYPE, Palette};
use crate::app::App;

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let palette = Palette::for_theme(app.theme);

    let lines = match app.camera_url.as_deref() {
        Some(url) => vec![
            Line::from(Span::styled(
                "Stream running",
                Style::default()
                    .fg(palette.success)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(vec![
                Span::styled("Feed: ", palette.muted()),
                Span::styled(url.to_string(), Style::default().fg(palette.text_primary)),
            ]),
            Line::default(),
            Line::from(Span::styled(
                "Open the feed URL in any MJPEG viewer.",
                palette.muted(),
            )),
        ],
        None => vec![
            Line::from(Span::styled(
                "Stream stopped",
                Style::default().fg(palette.text_secondary),
            )),
            Line::default(),
            Line::from(Span::styled("Press 's' to start the camera.", palette.muted())),
        ],
    };

    let body = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Camera ")
            .title_style(palette.title_style())
            .borders(Borders::ALL)
            .border_type(BORDER_TYPE)
            .border_style(palette.border_style()),
    );
    frame.render_widget(body, area);
}
