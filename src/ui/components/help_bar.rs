//! Key hint bar.
//!
//! Renders a single line such as `[j/k] move  [space] toggle`, with the
//! bracketed keys highlighted.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::ui::theme::Theme;

/// Hints while browsing the table.
pub const TABLE_HINTS: &str =
    "[j/k] move  [space] toggle  [h/l] page  [b] bulk select  [?] help  [q] quit";

/// Hints while the bulk-select popup has focus.
pub const OVERLAY_HINTS: &str = "[0-9] count  [Enter] submit  [Esc] close";

/// Render a hint line into `area`.
pub fn render_hints(frame: &mut Frame, area: Rect, hints: &str, theme: &Theme) {
    let line = Line::from(hint_spans(hints, theme));
    frame.render_widget(Paragraph::new(line), area);
}

/// Split hint text into key spans and description spans.
fn hint_spans(hints: &str, theme: &Theme) -> Vec<Span<'static>> {
    let key_style = Style::default().fg(theme.accent);
    let text_style = theme.hint();

    let mut spans = Vec::new();
    let mut rest = hints;
    while let Some(open) = rest.find('[') {
        let Some(close) = rest[open..].find(']').map(|i| open + i) else {
            break;
        };
        if open > 0 {
            spans.push(Span::styled(rest[..open].to_string(), text_style));
        }
        spans.push(Span::styled(rest[open..=close].to_string(), key_style));
        rest = &rest[close + 1..];
    }
    if !rest.is_empty() {
        spans.push(Span::styled(rest.to_string(), text_style));
    }
    spans
}
