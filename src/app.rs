//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern for predictable
//! state management in the TUI application. `update` never performs I/O:
//! work that needs the network is queued as a [`Command`] and picked up by
//! the main loop through [`App::take_commands`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::{debug, info, trace};

use crate::events::Event;
use crate::table::ArtworkTable;
use crate::tasks::{ApiMessage, Command};
use crate::ui::{ArtworksAction, ArtworksView, HelpAction, HelpView, LoadingIndicator};

/// The current view/screen state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Browsing the artwork table.
    #[default]
    Browsing,
    /// Help panel is displayed over the table.
    Help,
    /// Application is in the process of exiting.
    Exiting,
}

/// The main application struct that holds all state.
///
/// This implements the Model part of The Elm Architecture (TEA).
pub struct App {
    /// The current view state.
    state: AppState,
    /// Whether the application should quit.
    should_quit: bool,
    /// Pagination and selection state.
    table: ArtworkTable,
    /// The artwork table view.
    artworks_view: ArtworksView,
    /// The help panel.
    help_view: HelpView,
    /// Status bar spinner.
    loading: LoadingIndicator,
    /// Commands waiting to be dispatched by the main loop.
    commands: Vec<Command>,
}

impl App {
    /// Create a new application instance.
    pub fn new() -> Self {
        Self {
            state: AppState::default(),
            should_quit: false,
            table: ArtworkTable::new(),
            artworks_view: ArtworksView::new(),
            help_view: HelpView::new(),
            loading: LoadingIndicator::new(),
            commands: Vec::new(),
        }
    }

    /// Queue the initial load of the first page.
    pub fn start(&mut self) {
        info!("Loading first page");
        let request = self.table.reload();
        self.commands.push(Command::LoadPage(request));
        self.sync_loading();
    }

    /// Drain the queued commands.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// The artwork table state.
    pub fn table(&self) -> &ArtworkTable {
        &self.table
    }

    /// The status bar spinner.
    #[cfg(test)]
    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the current application state.
    #[cfg(test)]
    pub fn state(&self) -> AppState {
        self.state
    }

    fn quit(&mut self) {
        self.should_quit = true;
        self.state = AppState::Exiting;
    }

    // ========================================================================
    // Update
    // ========================================================================

    /// Update the application state based on an event.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Mouse(mouse_event) => {
                trace!(kind = ?mouse_event.kind, column = mouse_event.column, row = mouse_event.row, "Mouse event");
                self.handle_mouse_event(mouse_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => {
                self.loading.tick();
            }
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers == KeyModifiers::CONTROL {
            self.quit();
            return;
        }

        match self.state {
            AppState::Browsing => {
                let action = self.artworks_view.handle_input(key_event, &mut self.table);
                self.handle_artworks_action(action);
            }
            AppState::Help => {
                if let Some(HelpAction::Close) = self.help_view.handle_input(key_event) {
                    self.state = AppState::Browsing;
                }
            }
            AppState::Exiting => {}
        }
    }

    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        if self.state != AppState::Browsing {
            return;
        }
        let action = self
            .artworks_view
            .handle_mouse(mouse_event, &mut self.table);
        self.handle_artworks_action(action);
    }

    fn handle_artworks_action(&mut self, action: Option<ArtworksAction>) {
        match action {
            Some(ArtworksAction::Request(command)) => {
                debug!(?command, "Queueing command");
                self.commands.push(command);
            }
            Some(ArtworksAction::ShowHelp) => {
                self.help_view.reset_scroll();
                self.state = AppState::Help;
            }
            Some(ArtworksAction::Quit) => self.quit(),
            None => {}
        }
        self.sync_loading();
    }

    /// Apply a result delivered by a background task.
    pub fn handle_api_message(&mut self, message: ApiMessage) {
        match message {
            ApiMessage::PageFetched {
                seq,
                page_index,
                result,
            } => {
                debug!(seq, page_index, ok = result.is_ok(), "Page response received");
                self.table.finish_page_load(seq, result);
            }
            ApiMessage::BulkSelectFetched { count, result } => {
                debug!(count, ok = result.is_ok(), "Bulk select response received");
                self.table.finish_bulk_select(result);
            }
        }
        self.sync_loading();
    }

    /// Make the spinner reflect what is in flight.
    fn sync_loading(&mut self) {
        if !self.table.is_loading() {
            self.loading.stop();
        } else if self.table.is_bulk_loading() {
            self.loading.show("Selecting rows...");
        } else {
            self.loading.show("Loading artworks...");
        }
    }

    // ========================================================================
    // View
    // ========================================================================

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(2), // Header
                Constraint::Min(1),    // Content
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.artworks_view
            .render(frame, chunks[1], &self.table, &self.loading);

        if self.state == AppState::Help {
            self.help_view.render(frame, area);
        }
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let title = Paragraph::new("LazyArt")
            .style(Style::default().fg(Color::Cyan))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::BOTTOM)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        frame.render_widget(title, area);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
