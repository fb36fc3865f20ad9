//! The page-fetching seam between the table component and the network.

use std::future::Future;

use super::error::Result;
use super::types::ArtworkPage;

/// Something that can return one page of the artwork collection.
///
/// `page` is the 1-based page number understood by the catalog API and
/// `limit` is the page size. Implemented by [`super::ArticClient`] and by
/// in-memory fakes in tests.
pub trait PageSource {
    /// Fetch a single page.
    fn fetch_page(&self, page: u32, limit: u32) -> impl Future<Output = Result<ArtworkPage>> + Send;
}
