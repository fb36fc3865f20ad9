//! In-memory page source for tests.

use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::api::error::Result;
use crate::api::{ApiError, Artwork, ArtworkPage, PageSource};

/// A fake catalog of `total` artworks with ids `1..=total`.
#[derive(Debug, Clone)]
pub struct FakeCatalog {
    total: u64,
    /// Fail when this 1-based page is requested.
    fail_on: Option<u32>,
    /// Serve at most this many rows per page regardless of `limit`.
    rows_per_page: Option<u32>,
    calls: Arc<Mutex<Vec<u32>>>,
}

impl FakeCatalog {
    pub fn new(total: u64) -> Self {
        Self {
            total,
            fail_on: None,
            rows_per_page: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing_on(mut self, page: u32) -> Self {
        self.fail_on = Some(page);
        self
    }

    pub fn with_rows_per_page(mut self, rows: u32) -> Self {
        self.rows_per_page = Some(rows);
        self
    }

    /// Pages requested so far, in order.
    pub fn calls(&self) -> Vec<u32> {
        self.calls.lock().unwrap().clone()
    }

    /// Build a page directly, bypassing call recording.
    pub fn page(&self, page: u32, limit: u32) -> ArtworkPage {
        let rows = u64::from(self.rows_per_page.unwrap_or(limit));
        let start = u64::from(page.saturating_sub(1)) * rows;
        let end = (start + rows).min(self.total);
        let data = (start + 1..=end)
            .map(|id| Artwork::new(id, format!("Artwork {}", id)))
            .collect();
        ArtworkPage::new(data, self.total)
    }
}

impl PageSource for FakeCatalog {
    fn fetch_page(&self, page: u32, limit: u32) -> impl Future<Output = Result<ArtworkPage>> + Send {
        self.calls.lock().unwrap().push(page);
        let result = if self.fail_on == Some(page) {
            Err(ApiError::ServerError(format!("page {} unavailable", page)))
        } else {
            Ok(self.page(page, limit))
        };
        async move { result }
    }
}
