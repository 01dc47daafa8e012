//! Centralized color palette for the TUI.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

use plantdeck_types::Theme;

/// Resolved color palette for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub primary: Color,

    pub success: Color,
    pub warning: Color,
    pub danger: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub border: Color,
    pub bg: Color,
}

impl Palette {
    pub const fn dark() -> Self {
        Self {
            primary: Color::Rgb(74, 222, 128),        // green-400
            success: Color::Rgb(74, 222, 128),        // green-400
            warning: Color::Rgb(251, 191, 36),        // amber-400
            danger: Color::Rgb(248, 113, 113),        // red-400
            text_primary: Color::Rgb(248, 250, 252),  // slate-50
            text_secondary: Color::Rgb(148, 163, 184), // slate-400
            text_muted: Color::Rgb(100, 116, 139),    // slate-500
            border: Color::Rgb(71, 85, 105),          // slate-600
            bg: Color::Rgb(15, 23, 42),               // slate-900
        }
    }

    pub const fn light() -> Self {
        Self {
            primary: Color::Rgb(22, 163, 74),        // green-600
            success: Color::Rgb(22, 163, 74),        // green-600
            warning: Color::Rgb(217, 119, 6),        // amber-600
            danger: Color::Rgb(220, 38, 38),         // red-600
            text_primary: Color::Rgb(15, 23, 42),    // slate-900
            text_secondary: Color::Rgb(71, 85, 105), // slate-600
            text_muted: Color::Rgb(148, 163, 184),   // slate-400
            border: Color::Rgb(203, 213, 225),       // slate-300
            bg: Color::Rgb(248, 250, 252),           // slate-50
        }
    }

    /// Palette for a configured theme. `Auto` follows the common case for
    /// terminals and resolves to dark.
    pub const fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self::light(),
            Theme::Dark | Theme::Auto => Self::dark(),
        }
    }

    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.primary)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }
}

/// Default border type for all blocks.
pub const BORDER_TYPE: BorderType = BorderType::Rounded;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_resolves_to_dark() {
        let auto = Palette::for_theme(Theme::Auto);
        let dark = Palette::dark();
        assert_eq!(auto.bg, dark.bg);
    }
}
