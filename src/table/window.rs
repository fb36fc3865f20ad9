//! The page window: which slice of the remote collection is on screen.

/// Fixed number of rows per page.
pub const PAGE_SIZE: u32 = 10;

/// Current page index, page size and the server-reported total.
///
/// The total may change between requests; it is simply overwritten with the
/// latest value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    page_index: u32,
    page_size: u32,
    total_records: u64,
}

impl Default for PageWindow {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl PageWindow {
    /// Create a window at page 0 with an unknown (zero) total.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
            total_records: 0,
        }
    }

    /// Zero-based page index.
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    /// Rows per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Total records as last reported by the server.
    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    /// Move to a page.
    pub fn set_page_index(&mut self, page_index: u32) {
        self.page_index = page_index;
    }

    /// Record the server-reported total.
    pub fn set_total_records(&mut self, total: u64) {
        self.total_records = total;
    }

    /// Offset of the first row on the current page.
    pub fn first(&self) -> u64 {
        u64::from(self.page_index) * u64::from(self.page_size)
    }

    /// The 1-based page number the API expects for the current page.
    pub fn api_page(&self) -> u32 {
        self.page_index + 1
    }

    /// Number of pages at the current total.
    pub fn page_count(&self) -> u64 {
        self.total_records.div_ceil(u64::from(self.page_size))
    }

    /// Index of the last page, or 0 when the total is unknown.
    pub fn last_index(&self) -> u32 {
        let last = self.page_count().saturating_sub(1);
        u32::try_from(last).unwrap_or(u32::MAX)
    }

    /// Index of the following page, if there is one.
    pub fn next_index(&self) -> Option<u32> {
        let next = self.page_index.checked_add(1)?;
        (u64::from(next) < self.page_count()).then_some(next)
    }

    /// Index of the preceding page, if there is one.
    pub fn prev_index(&self) -> Option<u32> {
        self.page_index.checked_sub(1)
    }

    /// 1-based inclusive range of rows shown, given how many are on screen.
    pub fn showing_range(&self, shown: usize) -> Option<(u64, u64)> {
        if shown == 0 {
            return None;
        }
        let first = self.first();
        Some((first + 1, first + shown as u64))
    }
}
