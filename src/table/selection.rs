//! Cross-page selection store.

use std::collections::{HashMap, HashSet};

use crate::api::{Artwork, ArtworkId};

/// Raised when the visible selection changes on the current page.
///
/// `selected_records` is the complete set of rows the user now has checked
/// on the visible page, not a delta.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionChangeEvent {
    /// Ids of the checked rows.
    pub selected_ids: HashSet<ArtworkId>,
    /// The checked rows themselves, in display order.
    pub selected_records: Vec<Artwork>,
}

impl SelectionChangeEvent {
    /// Build an event from the checked rows.
    pub fn from_records(selected_records: Vec<Artwork>) -> Self {
        let selected_ids = selected_records.iter().map(|a| a.id).collect();
        Self {
            selected_ids,
            selected_records,
        }
    }
}

/// Artworks the user has selected, keyed by id, across every page seen.
///
/// Holds at most one entry per id. Navigation never clears it; entries leave
/// only when their row is deselected on its page.
#[derive(Debug, Clone, Default)]
pub struct SelectionStore {
    entries: HashMap<ArtworkId, Artwork>,
}

impl SelectionStore {
    /// Create an empty store.
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the store's entries for the visible page match `event`.
    ///
    /// Every id in `visible_ids` is dropped, then every record in the event is
    /// inserted. Entries belonging to other pages are untouched.
    pub fn reconcile<I>(&mut self, visible_ids: I, event: SelectionChangeEvent)
    where
        I: IntoIterator<Item = ArtworkId>,
    {
        for id in visible_ids {
            self.entries.remove(&id);
        }
        for art in event.selected_records {
            self.entries.insert(art.id, art);
        }
    }

    /// Insert or overwrite records without removing anything.
    ///
    /// Returns how many ids were not previously selected.
    pub fn merge<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = Artwork>,
    {
        records
            .into_iter()
            .filter(|art| self.entries.insert(art.id, art.clone()).is_none())
            .count()
    }

    /// The subset of `records` that is currently selected, in page order.
    pub fn current_page_selection<'a>(&self, records: &'a [Artwork]) -> Vec<&'a Artwork> {
        records
            .iter()
            .filter(|art| self.entries.contains_key(&art.id))
            .collect()
    }

    /// Check whether an id is selected.
    pub fn contains(&self, id: ArtworkId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Get the stored record for an id.
    #[cfg(test)]
    pub fn get(&self, id: ArtworkId) -> Option<&Artwork> {
        self.entries.get(&id)
    }

    /// Selected ids in ascending order.
    #[cfg(test)]
    pub fn ids(&self) -> Vec<ArtworkId> {
        let mut ids: Vec<_> = self.entries.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Number of selected artworks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing is selected.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
