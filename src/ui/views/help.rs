//! Help panel listing keyboard and mouse controls.
//!
//! Opened with '?' and closed with '?', 'q', or Escape.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::centered_rect;
use crate::ui::theme::Theme;

/// Controls grouped by where they apply.
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Table",
        &[
            ("j / ↓", "Move down"),
            ("k / ↑", "Move up"),
            ("space", "Toggle row"),
            ("a", "Select every row on the page"),
            ("A", "Clear the page"),
            ("l / → / n", "Next page"),
            ("h / ← / p", "Previous page"),
            ("g / G", "First / last page"),
            ("r", "Reload page"),
            ("b", "Open bulk select"),
        ],
    ),
    (
        "Bulk select",
        &[
            ("0-9", "Number of rows"),
            ("Backspace", "Delete digit"),
            ("Enter", "Select the first N rows"),
            ("Esc", "Close, keeping the number"),
        ],
    ),
    (
        "Mouse",
        &[
            ("click row", "Toggle row"),
            ("click [▾]", "Open bulk select"),
            ("click outside", "Close bulk select"),
            ("wheel", "Move cursor"),
        ],
    ),
    (
        "Global",
        &[("?", "Toggle this help"), ("q / Ctrl+C", "Quit")],
    ),
];

/// Actions that can be returned from the help view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpAction {
    /// Close the help panel.
    Close,
}

/// The help panel view.
pub struct HelpView {
    /// Current scroll position.
    scroll: usize,
    /// Visible height (updated on render).
    visible_height: usize,
    theme: Theme,
}

impl HelpView {
    /// Create a new help view.
    pub fn new() -> Self {
        Self {
            scroll: 0,
            visible_height: 0,
            theme: Theme::default(),
        }
    }

    /// Reset scroll position to top.
    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    fn total_lines() -> usize {
        // Header and blank line per section, plus the footer.
        SECTIONS
            .iter()
            .map(|(_, bindings)| bindings.len() + 2)
            .sum::<usize>()
            + 1
    }

    fn max_scroll(&self) -> usize {
        Self::total_lines().saturating_sub(self.visible_height)
    }

    /// Handle keyboard input for the help view.
    pub fn handle_input(&mut self, key_event: KeyEvent) -> Option<HelpAction> {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('?'), _)
            | (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Esc, _) => Some(HelpAction::Close),

            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }

            // Consume all other input when help is open
            _ => None,
        }
    }

    /// Render the help panel centered in `area`.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let popup = centered_rect(56, Self::total_lines() as u16 + 2, area);
        frame.render_widget(Clear, popup);

        let block = Block::default()
            .title(" Help ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent));
        let inner = block.inner(popup);
        frame.render_widget(block, popup);

        self.visible_height = inner.height as usize;
        self.scroll = self.scroll.min(self.max_scroll());

        let paragraph = Paragraph::new(self.build_content_lines()).scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, inner);
    }

    fn build_content_lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::with_capacity(Self::total_lines());

        for (section, bindings) in SECTIONS {
            lines.push(Line::from(Span::styled(
                format!("── {} ──", section),
                self.theme.title(),
            )));
            for (key, description) in *bindings {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:>14}", key),
                        Style::default()
                            .fg(self.theme.selected)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw("  "),
                    Span::raw(*description),
                ]));
            }
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "Press ?, q, or Esc to close",
            self.theme.hint(),
        )));
        lines
    }
}

impl Default for HelpView {
    fn default() -> Self {
        Self::new()
    }
}
