//! Async task management for non-blocking API operations.
//!
//! Network calls run in background tokio tasks so the UI stays responsive.
//! Results come back over an unbounded channel:
//! 1. A transition on the table returns a request (`PageRequest`, `BulkRequest`)
//! 2. The main loop hands it to `TaskSpawner`, which spawns a task
//! 3. The main loop keeps rendering and handling events
//! 4. When the task completes, it sends an `ApiMessage` through the channel
//! 5. The main loop polls the channel with `try_recv()` and applies the result
//!
//! Only the main loop mutates table state, so the selection store is never
//! touched from two places at once.

use tokio::sync::mpsc;
use tracing::debug;

use crate::api::{ApiError, Artwork, ArtworkPage, PageSource};
use crate::table::{collect_first, BulkRequest, PageRequest, PAGE_SIZE};

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum ApiMessage {
    /// A single page load finished.
    PageFetched {
        /// Sequence number of the request.
        seq: u64,
        /// Zero-based page index that was requested.
        page_index: u32,
        result: Result<ArtworkPage, ApiError>,
    },

    /// A bulk select finished fetching.
    BulkSelectFetched {
        /// Number of rows that were asked for.
        count: u32,
        result: Result<Vec<Artwork>, ApiError>,
    },
}

/// Work the application wants executed off the UI thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Load one page.
    LoadPage(PageRequest),
    /// Gather the first N rows across pages.
    BulkSelect(BulkRequest),
}

/// Spawns background tasks against a page source.
#[derive(Clone)]
pub struct TaskSpawner<S> {
    tx: mpsc::UnboundedSender<ApiMessage>,
    source: S,
}

impl<S> TaskSpawner<S>
where
    S: PageSource + Clone + Send + Sync + 'static,
{
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<ApiMessage>, source: S) -> Self {
        Self { tx, source }
    }

    /// Spawn whatever task a command calls for.
    pub fn dispatch(&self, command: Command) {
        match command {
            Command::LoadPage(request) => self.spawn_fetch_page(request),
            Command::BulkSelect(request) => self.spawn_bulk_select(request),
        }
    }

    /// Spawn a task to fetch one page.
    pub fn spawn_fetch_page(&self, request: PageRequest) {
        let tx = self.tx.clone();
        let source = self.source.clone();
        tokio::spawn(async move {
            let result = source
                .fetch_page(request.api_page(), request.page_size)
                .await;
            let _ = tx.send(ApiMessage::PageFetched {
                seq: request.seq,
                page_index: request.page_index,
                result,
            });
        });
    }

    /// Spawn a task that fetches pages sequentially for a bulk select.
    pub fn spawn_bulk_select(&self, request: BulkRequest) {
        let tx = self.tx.clone();
        let source = self.source.clone();
        tokio::spawn(async move {
            let result = collect_first(&source, request.count, PAGE_SIZE).await;
            debug!(count = request.count, ok = result.is_ok(), "Bulk select task done");
            let _ = tx.send(ApiMessage::BulkSelectFetched {
                count: request.count,
                result,
            });
        });
    }
}

/// Create a new task channel and spawner.
///
/// Returns a tuple of (receiver, spawner). The receiver should be polled
/// in the main event loop, and the spawner should be used to spawn tasks.
pub fn create_task_channel<S>(source: S) -> (mpsc::UnboundedReceiver<ApiMessage>, TaskSpawner<S>)
where
    S: PageSource + Clone + Send + Sync + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    (rx, TaskSpawner::new(tx, source))
}
