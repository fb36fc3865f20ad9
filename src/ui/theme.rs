//! Theme and styling configuration.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Titles, headers and the loading spinner.
    pub accent: Color,
    /// Background of the row under the cursor.
    pub highlight: Color,
    /// Checked rows and the selection count.
    pub selected: Color,
    /// Hints, placeholders and borders.
    pub muted: Color,
    /// Background of the bulk-select toggle button.
    pub button: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            highlight: Color::DarkGray,
            selected: Color::Green,
            muted: Color::DarkGray,
            button: Color::Blue,
        }
    }
}

impl Theme {
    /// Style for table and dialog titles.
    pub fn title(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Style for secondary text.
    pub fn hint(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for the row under the cursor.
    pub fn cursor_row(&self) -> Style {
        Style::default()
            .fg(self.fg)
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }
}
