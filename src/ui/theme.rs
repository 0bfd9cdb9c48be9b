//! Theme definitions for clanboard
//!
//! Provides the light and dark palettes. The dark-mode preference picks
//! between them; nothing else about the theme varies.

use crate::ui::table::ThemeMode;
use ratatui::style::{Color, Modifier, Style};

/// Complete theme with all required colors
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub fg_dim: Color,

    // Accent colors
    pub accent: Color,
    pub accent_fg: Color,

    // Status colors
    pub error: Color,

    // UI element colors
    pub border: Color,
    pub header_bg: Color,
    pub cursor_row_bg: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
}

impl Theme {
    /// Create a theme from a theme mode
    pub fn from_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Self::light(),
            ThemeMode::Dark => Self::dark(),
        }
    }

    /// Light palette (default)
    pub fn light() -> Self {
        Self {
            // Base
            bg: Color::Rgb(255, 255, 255),         // #ffffff
            fg: Color::Rgb(33, 33, 33),            // #212121
            fg_dim: Color::Rgb(117, 117, 117),     // #757575

            // Accent (primary blue)
            accent: Color::Rgb(25, 118, 210),      // #1976d2
            accent_fg: Color::Rgb(255, 255, 255),

            // Status
            error: Color::Rgb(211, 47, 47),        // #d32f2f

            // UI elements
            border: Color::Rgb(224, 224, 224),     // #e0e0e0
            header_bg: Color::Rgb(245, 245, 245),  // #f5f5f5
            cursor_row_bg: Color::Rgb(238, 242, 250),
            selection_bg: Color::Rgb(25, 118, 210),
            selection_fg: Color::Rgb(255, 255, 255),
        }
    }

    /// Dark palette
    pub fn dark() -> Self {
        Self {
            // Base
            bg: Color::Rgb(18, 18, 18),            // #121212
            fg: Color::Rgb(255, 255, 255),         // #ffffff
            fg_dim: Color::Rgb(170, 170, 170),     // #aaaaaa

            // Accent (primary light blue)
            accent: Color::Rgb(144, 202, 249),     // #90caf9
            accent_fg: Color::Rgb(18, 18, 18),

            // Status
            error: Color::Rgb(244, 67, 54),        // #f44336

            // UI elements
            border: Color::Rgb(81, 81, 81),        // #515151
            header_bg: Color::Rgb(30, 30, 30),     // #1e1e1e
            cursor_row_bg: Color::Rgb(38, 44, 54),
            selection_bg: Color::Rgb(144, 202, 249),
            selection_fg: Color::Rgb(18, 18, 18),
        }
    }

    // Style helpers for common UI patterns

    /// Background fill for blocks
    pub fn block_style(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Default text style
    pub fn text(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Dimmed text style
    pub fn text_dim(&self) -> Style {
        Style::default().fg(self.fg_dim).bg(self.bg)
    }

    /// Bold text (clan name and total score cells)
    pub fn strong(&self) -> Style {
        self.text().add_modifier(Modifier::BOLD)
    }

    /// Title style
    pub fn title(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .bg(self.bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Sticky header row
    pub fn header(&self) -> Style {
        Style::default()
            .fg(self.fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Dark/light toggle control
    pub fn toggle(&self) -> Style {
        Style::default()
            .fg(self.accent_fg)
            .bg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    /// Row under the cursor
    pub fn cursor_row(&self) -> Style {
        Style::default().bg(self.cursor_row_bg)
    }

    /// Cell under the cursor
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }

    /// Border style
    pub fn border(&self) -> Style {
        Style::default().fg(self.border).bg(self.bg)
    }

    /// Error message style
    pub fn error(&self) -> Style {
        Style::default().fg(self.error).bg(self.bg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_from_mode() {
        let light = Theme::from_mode(ThemeMode::Light);
        assert_eq!(light.bg, Color::Rgb(255, 255, 255));

        let dark = Theme::from_mode(ThemeMode::Dark);
        assert_eq!(dark.bg, Color::Rgb(18, 18, 18));
    }
}
