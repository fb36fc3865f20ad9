//! User interface components and views.
//!
//! This module contains all TUI rendering logic. State lives in
//! [`crate::table`]; views only translate input into transitions on it and
//! draw it.

mod components;
pub mod theme;
mod views;

use ratatui::layout::Rect;

pub use components::LoadingIndicator;
pub use views::{ArtworksAction, ArtworksView, HelpAction, HelpView};

/// Create a centered rectangle, clamped to `area`.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
