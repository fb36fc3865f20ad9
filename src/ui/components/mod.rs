//! Reusable UI components.

mod bulk_select;
mod help_bar;
mod loading;

pub use bulk_select::{contains, BulkSelectPopup, PopupHit};
pub use help_bar::{render_hints, OVERLAY_HINTS, TABLE_HINTS};
pub use loading::LoadingIndicator;
