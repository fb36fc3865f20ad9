//! Artwork table view.
//!
//! Renders the paginated artwork table with its checkbox column, the
//! bulk-select toggle and popup, and a status line. Input is translated into
//! transitions on [`ArtworkTable`]; anything that needs the network comes
//! back as an [`ArtworksAction::Request`].

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};
use tracing::debug;

use crate::api::ArtworkId;
use crate::table::{ArtworkTable, PageChangeEvent};
use crate::tasks::Command;
use crate::ui::components::{
    contains, render_hints, BulkSelectPopup, LoadingIndicator, PopupHit, OVERLAY_HINTS,
    TABLE_HINTS,
};
use crate::ui::theme::Theme;

/// Column headers after the checkbox column.
pub const COLUMNS: [&str; 6] = [
    "Title",
    "Origin",
    "Artist",
    "Inscriptions",
    "Start Year",
    "End Year",
];

/// Label of the bulk-select toggle button.
const TOGGLE_LABEL: &str = "[▾]";

/// Actions the artwork view asks the application to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtworksAction {
    /// Execute a command in the background.
    Request(Command),
    /// Open the help panel.
    ShowHelp,
    /// Quit the application.
    Quit,
}

/// The artwork table view.
pub struct ArtworksView {
    /// Cursor row and scroll offset.
    table_state: TableState,
    /// The bulk-select popup.
    popup: BulkSelectPopup,
    /// Where the toggle button was last drawn.
    toggle_area: Option<Rect>,
    /// Where the data rows were last drawn, header excluded.
    rows_area: Option<Rect>,
    /// Color theme.
    theme: Theme,
}

impl ArtworksView {
    /// Create a new view with the cursor on the first row.
    pub fn new() -> Self {
        Self {
            table_state: TableState::default().with_selected(Some(0)),
            popup: BulkSelectPopup::new(),
            toggle_area: None,
            rows_area: None,
            theme: Theme::default(),
        }
    }

    /// Row index under the cursor.
    pub fn cursor(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn move_cursor(&mut self, table: &ArtworkTable, down: bool) {
        let len = table.records().len();
        if len == 0 {
            return;
        }
        let cursor = self.cursor().min(len - 1);
        let next = if down {
            (cursor + 1).min(len - 1)
        } else {
            cursor.saturating_sub(1)
        };
        self.table_state.select(Some(next));
    }

    fn reset_cursor(&mut self) {
        self.table_state.select(Some(0));
        *self.table_state.offset_mut() = 0;
    }

    fn change_page(&mut self, table: &mut ArtworkTable, page_index: u32) -> Option<ArtworksAction> {
        let request = table.on_page_change(PageChangeEvent { page_index })?;
        self.reset_cursor();
        Some(ArtworksAction::Request(Command::LoadPage(request)))
    }

    fn submit(&mut self, table: &mut ArtworkTable) -> Option<ArtworksAction> {
        table
            .submit_bulk_select()
            .map(|request| ArtworksAction::Request(Command::BulkSelect(request)))
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Handle a key press.
    pub fn handle_input(
        &mut self,
        key_event: KeyEvent,
        table: &mut ArtworkTable,
    ) -> Option<ArtworksAction> {
        if table.overlay().is_visible() {
            return self.handle_overlay_input(key_event, table);
        }

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.move_cursor(table, true);
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.move_cursor(table, false);
                None
            }
            (KeyCode::Char(' '), _) => {
                table.toggle_row(self.cursor());
                None
            }
            (KeyCode::Char('a'), KeyModifiers::NONE) => {
                table.select_page();
                None
            }
            (KeyCode::Char('A'), _) => {
                table.clear_page();
                None
            }
            (KeyCode::Char('l'), KeyModifiers::NONE)
            | (KeyCode::Char('n'), KeyModifiers::NONE)
            | (KeyCode::Right, _) => {
                let next = table.window().next_index()?;
                self.change_page(table, next)
            }
            (KeyCode::Char('h'), KeyModifiers::NONE)
            | (KeyCode::Char('p'), KeyModifiers::NONE)
            | (KeyCode::Left, _) => {
                let prev = table.window().prev_index()?;
                self.change_page(table, prev)
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) => self.change_page(table, 0),
            (KeyCode::Char('G'), _) => {
                let last = table.window().last_index();
                self.change_page(table, last)
            }
            (KeyCode::Char('b'), KeyModifiers::NONE) => {
                debug!("Opening bulk select");
                table.overlay_mut().open();
                None
            }
            (KeyCode::Char('r'), KeyModifiers::NONE) => {
                Some(ArtworksAction::Request(Command::LoadPage(table.reload())))
            }
            (KeyCode::Char('?'), _) => Some(ArtworksAction::ShowHelp),
            (KeyCode::Char('q'), KeyModifiers::NONE) => Some(ArtworksAction::Quit),
            _ => None,
        }
    }

    /// Keys while the popup has focus. Everything else is swallowed.
    fn handle_overlay_input(
        &mut self,
        key_event: KeyEvent,
        table: &mut ArtworkTable,
    ) -> Option<ArtworksAction> {
        match key_event.code {
            KeyCode::Char(c) if c.is_ascii_digit() => {
                if !table.is_bulk_loading() {
                    table.overlay_mut().push_digit(c);
                }
                None
            }
            KeyCode::Backspace => {
                if !table.is_bulk_loading() {
                    table.overlay_mut().backspace();
                }
                None
            }
            KeyCode::Enter => self.submit(table),
            KeyCode::Esc => {
                table.overlay_mut().dismiss_outside();
                None
            }
            _ => None,
        }
    }

    /// Handle a mouse event.
    ///
    /// A click outside a visible popup dismisses it and is then handled as
    /// an ordinary click on whatever lies beneath.
    pub fn handle_mouse(
        &mut self,
        mouse: MouseEvent,
        table: &mut ArtworkTable,
    ) -> Option<ArtworksAction> {
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if table.overlay().is_visible() {
                    match self.popup.hit(column, row) {
                        PopupHit::Submit => return self.submit(table),
                        PopupHit::Inside => return None,
                        PopupHit::Outside => {
                            debug!(column, row, "Click outside bulk select");
                            table.overlay_mut().dismiss_outside();
                        }
                    }
                }

                if self.toggle_area.is_some_and(|r| contains(r, column, row)) {
                    table.overlay_mut().open();
                    return None;
                }

                if let Some(index) = self.row_at(column, row) {
                    if index < table.records().len() {
                        self.table_state.select(Some(index));
                        table.toggle_row(index);
                    }
                }
                None
            }
            MouseEventKind::ScrollDown if !table.overlay().is_visible() => {
                self.move_cursor(table, true);
                None
            }
            MouseEventKind::ScrollUp if !table.overlay().is_visible() => {
                self.move_cursor(table, false);
                None
            }
            _ => None,
        }
    }

    /// Visible record index under a cell, if it lies on a data row.
    fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let area = self.rows_area?;
        if !contains(area, column, row) {
            return None;
        }
        Some(usize::from(row - area.y) + self.table_state.offset())
    }

    // ========================================================================
    // Rendering
    // ========================================================================

    /// Render the view.
    pub fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        table: &ArtworkTable,
        loading: &LoadingIndicator,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Toggle, title, selection count
                Constraint::Min(3),    // Table
                Constraint::Length(1), // Status
                Constraint::Length(1), // Key hints
            ])
            .split(area);

        self.render_header(frame, chunks[0], table);
        self.render_table(frame, chunks[1], table);
        self.render_status(frame, chunks[2], table, loading);

        let hints = if table.overlay().is_visible() {
            OVERLAY_HINTS
        } else {
            TABLE_HINTS
        };
        render_hints(frame, chunks[3], hints, &self.theme);

        let anchor = self.toggle_area.unwrap_or(chunks[0]);
        self.popup.render(
            frame,
            anchor,
            area,
            table.overlay(),
            table.window().total_records(),
            table.is_bulk_loading(),
            &self.theme,
        );
    }

    fn render_header(&mut self, frame: &mut Frame, area: Rect, table: &ArtworkTable) {
        let toggle_width = TOGGLE_LABEL.chars().count() as u16;
        self.toggle_area = Some(Rect {
            width: toggle_width.min(area.width),
            ..area
        });

        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(16)])
            .split(area);

        let count = table.selection().len();
        let line = Line::from(vec![
            Span::styled(
                TOGGLE_LABEL,
                Style::default()
                    .fg(self.theme.fg)
                    .bg(self.theme.button)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled("Artworks", self.theme.title()),
        ]);
        frame.render_widget(Paragraph::new(line), halves[0]);

        let selected = Paragraph::new(Span::styled(
            format!("{} selected ", count),
            Style::default().fg(self.theme.selected),
        ))
        .alignment(Alignment::Right);
        frame.render_widget(selected, halves[1]);
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect, table: &ArtworkTable) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.hint());
        let inner = block.inner(area);

        let records = table.records();
        if records.is_empty() {
            self.rows_area = None;
            let message = if table.is_page_loading() {
                "Loading artworks..."
            } else {
                "No artworks"
            };
            let empty = Paragraph::new(message)
                .style(self.theme.hint())
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        if self.cursor() >= records.len() {
            self.table_state.select(Some(records.len() - 1));
        }

        // Header occupies the first inner line.
        self.rows_area = Some(Rect {
            y: inner.y.saturating_add(1),
            height: inner.height.saturating_sub(1),
            ..inner
        });

        let header = Row::new(
            std::iter::once(Cell::from("   "))
                .chain(COLUMNS.iter().map(|name| Cell::from(*name))),
        )
        .style(self.theme.title());

        let checked_ids: HashSet<ArtworkId> = table
            .current_page_selection()
            .iter()
            .map(|art| art.id)
            .collect();

        let rows: Vec<Row> = records
            .iter()
            .map(|art| {
                let checked = checked_ids.contains(&art.id);
                let style = if checked {
                    Style::default().fg(self.theme.selected)
                } else {
                    Style::default().fg(self.theme.fg)
                };
                Row::new(vec![
                    Cell::from(if checked { "[x]" } else { "[ ]" }),
                    Cell::from(single_line(art.title())),
                    Cell::from(single_line(art.place_of_origin())),
                    Cell::from(single_line(art.artist_display())),
                    Cell::from(single_line(art.inscriptions())),
                    Cell::from(art.date_start_display()),
                    Cell::from(art.date_end_display()),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Length(3),
            Constraint::Percentage(26),
            Constraint::Percentage(12),
            Constraint::Percentage(26),
            Constraint::Percentage(20),
            Constraint::Length(10),
            Constraint::Length(8),
        ];

        let widget = Table::new(rows, widths)
            .header(header)
            .block(block)
            .highlight_style(self.theme.cursor_row());

        frame.render_stateful_widget(widget, area, &mut self.table_state);
    }

    fn render_status(
        &self,
        frame: &mut Frame,
        area: Rect,
        table: &ArtworkTable,
        loading: &LoadingIndicator,
    ) {
        let window = table.window();
        let mut spans = vec![Span::styled(
            format!(
                " Page {} of {}",
                window.api_page(),
                window.page_count().max(1)
            ),
            Style::default().fg(self.theme.fg),
        )];
        if let Some((first, last)) = window.showing_range(table.records().len()) {
            spans.push(Span::styled(
                format!("  ·  {}-{} of {}", first, last, window.total_records()),
                self.theme.hint(),
            ));
        }
        if loading.is_active() {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                loading.text(),
                Style::default().fg(self.theme.accent),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

impl Default for ArtworksView {
    fn default() -> Self {
        Self::new()
    }
}

/// Collapse line breaks so a field fits on one table row.
fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}
