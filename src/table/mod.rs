//! The artwork table component.
//!
//! This module holds all pagination and selection state of the artwork
//! table and the transition functions that change it. It knows nothing about
//! rendering or about how requests are executed: transitions that need the
//! network return a request value, and the caller feeds the outcome back in.
//!
//! Page loads are tagged with a sequence number. Only the response to the
//! most recently issued page load is applied; older responses are dropped so
//! a slow request can never overwrite the page the user moved to afterwards.

mod bulk;
mod overlay;
mod selection;
#[cfg(test)]
pub(crate) mod test_support;
mod window;

use tracing::{debug, error, info};

use crate::api::{ApiError, Artwork, ArtworkPage};

pub use bulk::{collect_first, BulkRequest};
pub use overlay::{BulkSelectOverlay, PLACEHOLDER};
pub use selection::{SelectionChangeEvent, SelectionStore};
pub use window::{PageWindow, PAGE_SIZE};

/// Raised when the user asks for another page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChangeEvent {
    /// Zero-based index of the requested page.
    pub page_index: u32,
}

/// A page load the caller must execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Sequence number to hand back to [`ArtworkTable::finish_page_load`].
    pub seq: u64,
    /// Zero-based page index.
    pub page_index: u32,
    /// Rows per page.
    pub page_size: u32,
}

impl PageRequest {
    /// The 1-based page number for the API.
    pub fn api_page(&self) -> u32 {
        self.page_index + 1
    }
}

/// Pagination and cross-page selection state of the artwork table.
#[derive(Debug, Clone, Default)]
pub struct ArtworkTable {
    /// Records on the visible page, in server order.
    records: Vec<Artwork>,
    /// Current page and total.
    window: PageWindow,
    /// Selected artworks across all pages.
    store: SelectionStore,
    /// The bulk-select input overlay.
    overlay: BulkSelectOverlay,
    /// A page load is in flight.
    page_loading: bool,
    /// A bulk select is in flight.
    bulk_loading: bool,
    /// Sequence number of the latest page load issued.
    latest_seq: u64,
}

impl ArtworkTable {
    /// Create an empty table at page 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records on the visible page.
    pub fn records(&self) -> &[Artwork] {
        &self.records
    }

    /// The page window.
    pub fn window(&self) -> &PageWindow {
        &self.window
    }

    /// The selection store.
    pub fn selection(&self) -> &SelectionStore {
        &self.store
    }

    /// The bulk-select overlay.
    pub fn overlay(&self) -> &BulkSelectOverlay {
        &self.overlay
    }

    /// Mutable access to the bulk-select overlay.
    pub fn overlay_mut(&mut self) -> &mut BulkSelectOverlay {
        &mut self.overlay
    }

    /// Whether any load is in flight.
    pub fn is_loading(&self) -> bool {
        self.page_loading || self.bulk_loading
    }

    /// Whether a page load is in flight.
    pub fn is_page_loading(&self) -> bool {
        self.page_loading
    }

    /// Whether a bulk select is in flight.
    pub fn is_bulk_loading(&self) -> bool {
        self.bulk_loading
    }

    // ========================================================================
    // Page loading
    // ========================================================================

    /// Start a load of the given page and mark the table as loading.
    pub fn begin_page_load(&mut self, page_index: u32) -> PageRequest {
        self.latest_seq += 1;
        self.page_loading = true;
        debug!(seq = self.latest_seq, page_index, "Page load issued");
        PageRequest {
            seq: self.latest_seq,
            page_index,
            page_size: self.window.page_size(),
        }
    }

    /// Reload the current page.
    pub fn reload(&mut self) -> PageRequest {
        self.begin_page_load(self.window.page_index())
    }

    /// Move to another page.
    ///
    /// Returns the load to issue, or `None` when the page is already current.
    pub fn on_page_change(&mut self, event: PageChangeEvent) -> Option<PageRequest> {
        if event.page_index == self.window.page_index() {
            return None;
        }
        self.window.set_page_index(event.page_index);
        Some(self.begin_page_load(event.page_index))
    }

    /// Apply the outcome of a page load.
    ///
    /// On success the visible records and total are replaced. On failure the
    /// error is logged and both stay as they were. Either way the loading flag
    /// clears. Responses to superseded requests are ignored entirely.
    ///
    /// Returns true if new records were applied.
    pub fn finish_page_load(
        &mut self,
        seq: u64,
        result: Result<ArtworkPage, ApiError>,
    ) -> bool {
        if seq != self.latest_seq {
            debug!(seq, latest = self.latest_seq, "Discarding stale page response");
            return false;
        }

        self.page_loading = false;
        match result {
            Ok(page) => {
                debug!(
                    page_index = self.window.page_index(),
                    rows = page.data.len(),
                    total = page.total(),
                    "Page loaded"
                );
                self.window.set_total_records(page.total());
                self.records = page.data;
                true
            }
            Err(e) => {
                error!(page_index = self.window.page_index(), error = %e, "Fetch error");
                false
            }
        }
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Reconcile the store with the selection reported for the visible page.
    pub fn on_selection_change(&mut self, event: SelectionChangeEvent) {
        debug!(selected = event.selected_ids.len(), "Selection changed on page");
        let visible_ids: Vec<_> = self.records.iter().map(|a| a.id).collect();
        self.store.reconcile(visible_ids, event);
    }

    /// The selected subset of the visible page, in page order.
    pub fn current_page_selection(&self) -> Vec<&Artwork> {
        self.store.current_page_selection(&self.records)
    }

    /// Whether the visible row at `row` is selected.
    #[cfg(test)]
    pub fn is_row_selected(&self, row: usize) -> bool {
        self.records
            .get(row)
            .is_some_and(|art| self.store.contains(art.id))
    }

    /// Flip the selection of one visible row.
    ///
    /// Returns false if `row` is out of range.
    pub fn toggle_row(&mut self, row: usize) -> bool {
        let Some(target) = self.records.get(row).map(|a| a.id) else {
            return false;
        };
        let was_selected = self.store.contains(target);

        let selected: Vec<Artwork> = self
            .records
            .iter()
            .filter(|art| {
                if art.id == target {
                    !was_selected
                } else {
                    self.store.contains(art.id)
                }
            })
            .cloned()
            .collect();

        self.on_selection_change(SelectionChangeEvent::from_records(selected));
        true
    }

    /// Select every visible row.
    pub fn select_page(&mut self) {
        let event = SelectionChangeEvent::from_records(self.records.clone());
        self.on_selection_change(event);
    }

    /// Deselect every visible row.
    pub fn clear_page(&mut self) {
        self.on_selection_change(SelectionChangeEvent::default());
    }

    // ========================================================================
    // Bulk select
    // ========================================================================

    /// Submit the overlay's pending count.
    ///
    /// An absent or zero count closes the overlay and does nothing else. A
    /// valid count marks the table as loading and returns the request; the
    /// overlay stays open until [`Self::finish_bulk_select`]. Ignored while a
    /// bulk select is already running.
    pub fn submit_bulk_select(&mut self) -> Option<BulkRequest> {
        if self.bulk_loading {
            debug!("Bulk select already running, ignoring submit");
            return None;
        }

        match self.overlay.requested_count() {
            Some(count) => {
                info!(count, "Bulk select requested");
                self.bulk_loading = true;
                Some(BulkRequest { count })
            }
            None => {
                debug!("Bulk select submitted without a usable count");
                self.overlay.close_after_submit();
                None
            }
        }
    }

    /// Apply the outcome of a bulk select.
    ///
    /// On success the records are merged into the store; nothing is removed.
    /// On failure nothing is merged. Either way loading clears, the overlay
    /// closes and the pending count resets. Returns the number of newly
    /// selected ids.
    pub fn finish_bulk_select(&mut self, result: Result<Vec<Artwork>, ApiError>) -> usize {
        self.bulk_loading = false;
        self.overlay.close_after_submit();

        match result {
            Ok(records) => {
                let added = self.store.merge(records);
                info!(added, total_selected = self.store.len(), "Bulk select merged");
                added
            }
            Err(e) => {
                error!(error = %e, "Bulk select fetch error");
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_support::FakeCatalog;

    fn loaded_table(catalog: &FakeCatalog, page_index: u32) -> ArtworkTable {
        let mut table = ArtworkTable::new();
        let request = if page_index == 0 {
            table.reload()
        } else {
            table
                .on_page_change(PageChangeEvent { page_index })
                .unwrap()
        };
        let page = catalog.page(request.api_page(), request.page_size);
        assert!(table.finish_page_load(request.seq, Ok(page)));
        table
    }

    fn go_to(table: &mut ArtworkTable, catalog: &FakeCatalog, page_index: u32) {
        let request = table
            .on_page_change(PageChangeEvent { page_index })
            .unwrap();
        let page = catalog.page(request.api_page(), request.page_size);
        assert!(table.finish_page_load(request.seq, Ok(page)));
    }

    fn selected_ids(table: &ArtworkTable) -> Vec<u64> {
        table.current_page_selection().iter().map(|a| a.id).collect()
    }

    fn rows_with_ids(table: &ArtworkTable, ids: &[u64]) -> Vec<Artwork> {
        table
            .records()
            .iter()
            .filter(|a| ids.contains(&a.id))
            .cloned()
            .collect()
    }

    #[test]
    fn test_new_table() {
        let table = ArtworkTable::new();
        assert!(table.records().is_empty());
        assert!(!table.is_loading());
        assert_eq!(table.window().page_index(), 0);
        assert!(table.selection().is_empty());
    }

    #[test]
    fn test_page_load_success() {
        let catalog = FakeCatalog::new(97);
        let mut table = ArtworkTable::new();

        let request = table.reload();
        assert_eq!(request.api_page(), 1);
        assert_eq!(request.page_size, 10);
        assert!(table.is_loading());

        assert!(table.finish_page_load(request.seq, Ok(catalog.page(1, 10))));
        assert!(!table.is_loading());
        assert_eq!(table.records().len(), 10);
        assert_eq!(table.window().total_records(), 97);
    }

    #[test]
    fn test_page_load_failure_keeps_previous_state() {
        let catalog = FakeCatalog::new(97);
        let mut table = loaded_table(&catalog, 0);
        let before = table.records().to_vec();

        let request = table
            .on_page_change(PageChangeEvent { page_index: 1 })
            .unwrap();
        let applied = table.finish_page_load(
            request.seq,
            Err(ApiError::InvalidResponse("truncated".to_string())),
        );

        assert!(!applied);
        assert!(!table.is_loading());
        assert_eq!(table.records(), before.as_slice());
        assert_eq!(table.window().total_records(), 97);
    }

    #[test]
    fn test_same_page_change_is_ignored() {
        let catalog = FakeCatalog::new(97);
        let mut table = loaded_table(&catalog, 0);
        assert!(table
            .on_page_change(PageChangeEvent { page_index: 0 })
            .is_none());
        assert!(!table.is_loading());
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let catalog = FakeCatalog::new(97);
        let mut table = loaded_table(&catalog, 0);

        let slow = table
            .on_page_change(PageChangeEvent { page_index: 1 })
            .unwrap();
        let fast = table
            .on_page_change(PageChangeEvent { page_index: 2 })
            .unwrap();

        assert!(table.finish_page_load(fast.seq, Ok(catalog.page(3, 10))));
        assert!(!table.finish_page_load(slow.seq, Ok(catalog.page(2, 10))));

        assert_eq!(table.window().page_index(), 2);
        assert_eq!(table.records()[0].id, 21);
        assert!(!table.is_loading());
    }

    #[test]
    fn test_stale_response_does_not_clear_loading() {
        let catalog = FakeCatalog::new(97);
        let mut table = loaded_table(&catalog, 0);

        let slow = table
            .on_page_change(PageChangeEvent { page_index: 1 })
            .unwrap();
        let _pending = table
            .on_page_change(PageChangeEvent { page_index: 2 })
            .unwrap();

        table.finish_page_load(slow.seq, Ok(catalog.page(2, 10)));
        assert!(table.is_loading());
    }

    #[test]
    fn test_selection_survives_navigation() {
        let catalog = FakeCatalog::new(97);
        let mut table = loaded_table(&catalog, 0);

        let rows = rows_with_ids(&table, &[3, 7]);
        table.on_selection_change(SelectionChangeEvent::from_records(rows));

        go_to(&mut table, &catalog, 1);
        let rows = rows_with_ids(&table, &[15]);
        table.on_selection_change(SelectionChangeEvent::from_records(rows));
        assert_eq!(selected_ids(&table), vec![15]);

        go_to(&mut table, &catalog, 0);
        assert_eq!(selected_ids(&table), vec![3, 7]);
        assert_eq!(table.selection().ids(), vec![3, 7, 15]);
    }

    #[test]
    fn test_deselect_on_revisited_page_removes_only_that_id() {
        let catalog = FakeCatalog::new(97);
        let mut table = loaded_table(&catalog, 0);
        table.select_page();

        go_to(&mut table, &catalog, 1);
        table.toggle_row(0);

        go_to(&mut table, &catalog, 0);
        let row_of_4 = table.records().iter().position(|a| a.id == 4).unwrap();
        table.toggle_row(row_of_4);

        let expected: Vec<u64> = (1..=10).filter(|&id| id != 4).chain([11]).collect();
        assert_eq!(table.selection().ids(), expected);
    }

    #[test]
    fn test_toggle_row() {
        let catalog = FakeCatalog::new(97);
        let mut table = loaded_table(&catalog, 0);

        assert!(table.toggle_row(2));
        assert!(table.is_row_selected(2));
        assert!(table.toggle_row(2));
        assert!(!table.is_row_selected(2));
        assert!(!table.toggle_row(99));
        assert!(table.selection().is_empty());
    }

    #[test]
    fn test_select_and_clear_page() {
        let catalog = FakeCatalog::new(97);
        let mut table = loaded_table(&catalog, 0);
        table.select_page();
        assert_eq!(table.selection().len(), 10);

        go_to(&mut table, &catalog, 1);
        table.select_page();
        table.clear_page();

        assert_eq!(table.selection().len(), 10);
        assert!(table.current_page_selection().is_empty());
    }

    #[test]
    fn test_bulk_select_without_count_is_noop() {
        let catalog = FakeCatalog::new(97);
        let mut table = loaded_table(&catalog, 0);
        table.overlay_mut().open();

        assert!(table.submit_bulk_select().is_none());
        assert!(!table.overlay().is_visible());
        assert!(!table.is_loading());
        assert!(table.selection().is_empty());
    }

    #[test]
    fn test_bulk_select_zero_is_noop() {
        let catalog = FakeCatalog::new(97);
        let mut table = loaded_table(&catalog, 0);
        table.overlay_mut().open();
        table.overlay_mut().set_pending(Some(0));

        assert!(table.submit_bulk_select().is_none());
        assert!(!table.overlay().is_visible());
        assert!(table.selection().is_empty());
    }

    #[test]
    fn test_bulk_select_merges_first_n() {
        let catalog = FakeCatalog::new(97);
        let mut table = loaded_table(&catalog, 0);
        go_to(&mut table, &catalog, 5);
        table.toggle_row(0);

        table.overlay_mut().open();
        table.overlay_mut().set_pending(Some(25));
        let request = table.submit_bulk_select().unwrap();
        assert_eq!(request.count, 25);
        assert!(table.is_loading());
        assert!(table.overlay().is_visible());

        let records = tokio_test::block_on(collect_first(&catalog, request.count, PAGE_SIZE));
        assert_eq!(catalog.calls(), vec![1, 2, 3]);
        let added = table.finish_bulk_select(records);

        assert_eq!(added, 25);
        assert_eq!(table.selection().len(), 26);
        assert!(table.selection().contains(51));
        assert!(!table.is_loading());
        assert!(!table.overlay().is_visible());
        assert_eq!(table.overlay().pending(), None);
    }

    #[test]
    fn test_bulk_select_failure_merges_nothing() {
        let catalog = FakeCatalog::new(97).failing_on(3);
        let mut table = loaded_table(&catalog, 0);
        table.overlay_mut().open();
        table.overlay_mut().set_pending(Some(25));
        let request = table.submit_bulk_select().unwrap();

        let result = tokio_test::block_on(collect_first(&catalog, request.count, PAGE_SIZE));
        let added = table.finish_bulk_select(result);

        assert_eq!(added, 0);
        assert!(table.selection().is_empty());
        assert!(!table.is_loading());
        assert!(!table.overlay().is_visible());
        assert_eq!(table.overlay().pending(), None);
    }

    #[test]
    fn test_bulk_select_ignored_while_running() {
        let mut table = ArtworkTable::new();
        table.overlay_mut().open();
        table.overlay_mut().set_pending(Some(5));
        assert!(table.submit_bulk_select().is_some());

        table.overlay_mut().set_pending(Some(8));
        assert!(table.submit_bulk_select().is_none());
        assert!(table.overlay().is_visible());
        assert_eq!(table.overlay().pending(), Some(8));
    }

    #[test]
    fn test_bulk_select_keeps_other_entries() {
        let catalog = FakeCatalog::new(97);
        let mut table = loaded_table(&catalog, 0);
        go_to(&mut table, &catalog, 9);
        table.select_page();

        table.overlay_mut().set_pending(Some(3));
        table.submit_bulk_select().unwrap();
        let added = table.finish_bulk_select(Ok(catalog.page(1, 10).data[..3].to_vec()));

        assert_eq!(added, 3);
        assert_eq!(table.selection().len(), 10);
    }
}
