//! Bulk-select popup.
//!
//! Renders the count input anchored below the toggle button and remembers
//! where it was drawn, so mouse clicks can be classified as inside or
//! outside it.

use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::table::{BulkSelectOverlay, PLACEHOLDER};
use crate::ui::theme::Theme;

/// Popup width including borders.
const POPUP_WIDTH: u16 = 24;

/// Popup height: borders, input, submit button, range hint.
const POPUP_HEIGHT: u16 = 5;

/// Where a click landed relative to the popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupHit {
    /// On the submit button.
    Submit,
    /// Somewhere else inside the popup.
    Inside,
    /// Outside the popup, or the popup is not on screen.
    Outside,
}

/// Screen state of the bulk-select popup.
#[derive(Debug, Clone, Default)]
pub struct BulkSelectPopup {
    /// Where the popup was last drawn.
    area: Option<Rect>,
    /// Where the submit button was last drawn.
    submit_area: Option<Rect>,
}

impl BulkSelectPopup {
    /// Create a popup that has not been drawn yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a click at the given cell.
    pub fn hit(&self, column: u16, row: u16) -> PopupHit {
        if self.submit_area.is_some_and(|r| contains(r, column, row)) {
            PopupHit::Submit
        } else if self.area.is_some_and(|r| contains(r, column, row)) {
            PopupHit::Inside
        } else {
            PopupHit::Outside
        }
    }

    /// Draw the popup below `anchor`, or forget its area if hidden.
    ///
    /// `max` is the advertised upper bound of the input (the server total).
    pub fn render(
        &mut self,
        frame: &mut Frame,
        anchor: Rect,
        bounds: Rect,
        overlay: &BulkSelectOverlay,
        max: u64,
        busy: bool,
        theme: &Theme,
    ) {
        if !overlay.is_visible() {
            self.area = None;
            self.submit_area = None;
            return;
        }

        let area = popup_rect(anchor, bounds);
        self.area = Some(area);
        frame.render_widget(Clear, area);

        let block = Block::default()
            .title(Span::styled(" Select rows ", theme.title()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.accent));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let line_at = |offset: u16| Rect {
            x: inner.x,
            y: inner.y + offset,
            width: inner.width,
            height: 1,
        };

        let text = overlay.input_text();
        let input = if text.is_empty() {
            Paragraph::new(PLACEHOLDER).style(theme.hint())
        } else {
            Paragraph::new(text.clone()).style(Style::default().fg(theme.fg))
        };
        if inner.height > 0 {
            frame.render_widget(input, line_at(0));
            if !busy {
                let cursor_x = inner.x + text.len() as u16;
                if cursor_x < inner.x + inner.width {
                    frame.set_cursor_position(Position::new(cursor_x, inner.y));
                }
            }
        }

        if inner.height > 1 {
            let label = if busy { "selecting..." } else { "submit" };
            let button = Paragraph::new(Line::from(Span::styled(
                format!("[ {} ]", label),
                Style::default()
                    .fg(theme.fg)
                    .bg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            )));
            let submit = Rect {
                width: (label.len() as u16 + 4).min(inner.width),
                ..line_at(1)
            };
            self.submit_area = Some(submit);
            frame.render_widget(button, submit);
        } else {
            self.submit_area = None;
        }

        if inner.height > 2 {
            let hint = Paragraph::new(format!("1 to {}", max.max(1))).style(theme.hint());
            frame.render_widget(hint, line_at(2));
        }
    }
}

/// Position the popup just below the anchor, kept inside `bounds`.
fn popup_rect(anchor: Rect, bounds: Rect) -> Rect {
    let width = POPUP_WIDTH.min(bounds.width);
    let height = POPUP_HEIGHT.min(bounds.height);
    let max_x = bounds.x + bounds.width.saturating_sub(width);
    let max_y = bounds.y + bounds.height.saturating_sub(height);
    Rect::new(
        anchor.x.min(max_x),
        (anchor.y + anchor.height).min(max_y),
        width,
        height,
    )
}

/// Check whether a cell lies inside a rectangle.
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}
