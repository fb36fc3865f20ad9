//! Artwork catalog client and types.
//!
//! This module provides the interface for reading the Art Institute of
//! Chicago public REST API.

mod client;
pub mod error;
mod source;
pub mod types;

pub use client::{ArticClient, DEFAULT_TIMEOUT_SECS};
pub use error::ApiError;
pub use source::PageSource;
pub use types::{Artwork, ArtworkId, ArtworkPage};
