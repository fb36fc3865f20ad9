//! Application views (screens).

mod artworks;
mod help;

pub use artworks::{ArtworksAction, ArtworksView};
pub use help::{HelpAction, HelpView};
