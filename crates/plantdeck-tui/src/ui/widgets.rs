//! Small reusable widgets and layout helpers.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::theme::{BORDER_TYPE, Palette};

/// A bordered card showing one metric value with its unit label.
pub fn metric_card(title: &str, value: String, palette: &Palette) -> Paragraph<'static> {
    let line = Line::from(Span::styled(
        value,
        Style::default()
            .fg(palette.text_primary)
            .add_modifier(Modifier::BOLD),
    ));
    Paragraph::new(line).alignment(Alignment::Center).block(
        Block::default()
            .title(format!(" {} ", title))
            .title_style(palette.title_style())
            .borders(Borders::ALL)
            .border_type(BORDER_TYPE)
            .border_style(palette.border_style()),
    )
}

/// A centered rect occupying the given percentages of `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

/// Draw a blocking alert dialog over everything else.
///
/// Input handling guarantees nothing but Enter/Esc gets through while this
/// is visible.
pub fn draw_alert(frame: &mut Frame, message: &str, palette: &Palette) {
    let area = centered_rect(50, 25, frame.area());
    frame.render_widget(Clear, area);

    let body = Paragraph::new(format!("{}\n\nPress Enter to dismiss", message))
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.text_primary))
        .block(
            Block::default()
                .title(" Alert ")
                .title_style(
                    Style::default()
                        .fg(palette.danger)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_type(BORDER_TYPE)
                .border_style(Style::default().fg(palette.danger)),
        );
    frame.render_widget(body, area);
}

/// Build a `key desc | key desc` hint line.
pub fn hint_line(hints: &[(&'static str, &'static str)], palette: &Palette) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" | ", palette.muted()));
        }
        spans.push(Span::styled(
            *key,
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(" {}", desc), palette.muted()));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_within_area() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 25, area);
        assert!(rect.width <= area.width);
        assert!(rect.height <= area.height);
        assert!(rect.x >= area.x && rect.y >= area.y);
    }
}
