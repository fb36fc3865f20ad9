//! Bulk selection: gather the first N artworks of the collection.

use tracing::{debug, instrument};

use crate::api::error::Result;
use crate::api::{Artwork, PageSource};

/// A validated bulk-select request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkRequest {
    /// Number of rows to select, always at least 1.
    pub count: u32,
}

/// Number of pages needed to cover `count` rows.
pub fn pages_needed(count: u32, page_size: u32) -> u32 {
    count.div_ceil(page_size.max(1))
}

/// Fetch pages `1..=pages_needed` one after another and return the first
/// `count` records in page order, then row order.
///
/// The accumulated total is checked after each page completes, and no further
/// request is issued once it reaches `count`. An empty page means the
/// collection is exhausted and also ends the loop. Any failure aborts the
/// whole operation and nothing gathered so far is returned.
#[instrument(skip(source))]
pub async fn collect_first<S>(source: &S, count: u32, page_size: u32) -> Result<Vec<Artwork>>
where
    S: PageSource + Sync,
{
    let target = count as usize;
    let pages = pages_needed(count, page_size);
    // `count` is user input and may far exceed the collection.
    let mut fetched: Vec<Artwork> = Vec::new();

    for page in 1..=pages {
        let result = source.fetch_page(page, page_size).await?;
        if result.is_empty() {
            debug!(page, "Empty page, collection exhausted");
            break;
        }

        fetched.extend(result.data);
        if fetched.len() >= target {
            break;
        }
    }

    fetched.truncate(target);
    debug!(requested = count, gathered = fetched.len(), "Bulk fetch complete");
    Ok(fetched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::test_support::FakeCatalog;

    fn ids(records: &[Artwork]) -> Vec<u64> {
        records.iter().map(|a| a.id).collect()
    }

    #[test]
    fn test_pages_needed() {
        assert_eq!(pages_needed(1, 10), 1);
        assert_eq!(pages_needed(10, 10), 1);
        assert_eq!(pages_needed(11, 10), 2);
        assert_eq!(pages_needed(25, 10), 3);
        assert_eq!(pages_needed(0, 10), 0);
    }

    #[test]
    fn test_collect_first_25_of_97() {
        let catalog = FakeCatalog::new(97);
        let records = tokio_test::block_on(collect_first(&catalog, 25, 10)).unwrap();

        assert_eq!(catalog.calls(), vec![1, 2, 3]);
        assert_eq!(records.len(), 25);
        assert_eq!(ids(&records), (1..=25).collect::<Vec<_>>());
    }

    #[test]
    fn test_collect_exact_page_stops_after_one_request() {
        let catalog = FakeCatalog::new(97);
        let records = tokio_test::block_on(collect_first(&catalog, 10, 10)).unwrap();

        assert_eq!(catalog.calls(), vec![1]);
        assert_eq!(records.len(), 10);
    }

    #[test]
    fn test_collect_stops_once_threshold_reached() {
        // Server ignores the limit and serves 20 rows per page.
        let catalog = FakeCatalog::new(97).with_rows_per_page(20);
        let records = tokio_test::block_on(collect_first(&catalog, 25, 10)).unwrap();

        assert_eq!(catalog.calls(), vec![1, 2]);
        assert_eq!(ids(&records), (1..=25).collect::<Vec<_>>());
    }

    #[test]
    fn test_collect_short_pages_bounded_by_pages_needed() {
        // Only 7 rows per page: three pages give 21 rows, fewer than asked.
        let catalog = FakeCatalog::new(97).with_rows_per_page(7);
        let records = tokio_test::block_on(collect_first(&catalog, 25, 10)).unwrap();

        assert_eq!(catalog.calls(), vec![1, 2, 3]);
        assert_eq!(records.len(), 21);
    }

    #[test]
    fn test_collect_more_than_total() {
        let catalog = FakeCatalog::new(12);
        let records = tokio_test::block_on(collect_first(&catalog, 50, 10)).unwrap();

        // Page 3 comes back empty and ends the loop.
        assert_eq!(catalog.calls(), vec![1, 2, 3]);
        assert_eq!(records.len(), 12);
    }

    #[test]
    fn test_collect_failure_discards_everything() {
        let catalog = FakeCatalog::new(97).failing_on(2);
        let result = tokio_test::block_on(collect_first(&catalog, 25, 10));

        assert!(result.is_err());
        assert_eq!(catalog.calls(), vec![1, 2]);
    }

    #[test]
    fn test_collect_huge_count_stops_at_exhaustion() {
        let catalog = FakeCatalog::new(12);
        let records = tokio_test::block_on(collect_first(&catalog, u32::MAX, 10)).unwrap();

        assert_eq!(catalog.calls(), vec![1, 2, 3]);
        assert_eq!(records.len(), 12);
    }

    #[test]
    fn test_collect_zero_issues_no_requests() {
        let catalog = FakeCatalog::new(97);
        let records = tokio_test::block_on(collect_first(&catalog, 0, 10)).unwrap();

        assert!(records.is_empty());
        assert!(catalog.calls().is_empty());
    }
}
