//! Event handling for the application.
//!
//! This module turns terminal input into application events.

mod handler;

use crossterm::event::{KeyEvent, MouseEvent};

pub use handler::EventHandler;

/// An application event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse button or wheel event.
    Mouse(MouseEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input arrived within the tick rate.
    Tick,
}
