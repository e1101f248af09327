//! Memoized decoded view over the packed sequence.

use std::cell::OnceCell;

use crate::item::StoredItem;

/// Observable state of the decoded view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
    /// No decoded view; the next read decodes
    Stale,
    /// Decoded view matches the packed sequence
    Fresh,
}

/// Two-state cache holding the decoded records.
///
/// Filled through a shared reference on read, emptied through a mutable
/// reference on every mutation of the owning store.
#[derive(Debug, Default, Clone)]
pub(crate) struct DecodedCache {
    items: OnceCell<Vec<StoredItem>>,
}

impl DecodedCache {
    pub(crate) fn state(&self) -> CacheState {
        if self.items.get().is_some() {
            CacheState::Fresh
        } else {
            CacheState::Stale
        }
    }

    /// Return the cached view, decoding with `decode` if stale
    pub(crate) fn get_or_decode<F>(&self, decode: F) -> &[StoredItem]
    where
        F: FnOnce() -> Vec<StoredItem>,
    {
        self.items.get_or_init(decode)
    }

    pub(crate) fn invalidate(&mut self) {
        self.items.take();
    }
}
