//! Explicit history cache keyed by symbol and date range.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use frontier_core::DateRange;

use crate::history::AssetHistory;

/// Cache key: upper-cased symbol plus the exact window.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HistoryKey {
    /// Upper-cased symbol.
    pub symbol: String,
    /// Requested window.
    pub range: DateRange,
}

impl HistoryKey {
    /// Creates a key, normalizing the symbol.
    #[must_use]
    pub fn new(symbol: &str, range: DateRange) -> Self {
        Self {
            symbol: symbol.trim().to_uppercase(),
            range,
        }
    }
}

/// Cache of [`AssetHistory`] values.
///
/// Entries are never evicted. Lookups hand out shared `Rc` handles so that a
/// history stays usable while the cache keeps growing.
#[derive(Debug, Default)]
pub struct HistoryCache {
    entries: RefCell<HashMap<HistoryKey, Rc<AssetHistory>>>,
}

impl HistoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached history for `(symbol, range)`, creating an unloaded
    /// one on a miss.
    pub fn get_or_create(&self, symbol: &str, range: DateRange) -> Rc<AssetHistory> {
        let key = HistoryKey::new(symbol, range);
        let mut entries = self.entries.borrow_mut();
        Rc::clone(
            entries
                .entry(key)
                .or_insert_with(|| Rc::new(AssetHistory::new(symbol, range))),
        )
    }

    /// Stores a pre-built history, replacing any entry with the same key.
    pub fn insert(&self, history: AssetHistory) -> Rc<AssetHistory> {
        let key = HistoryKey::new(history.symbol(), history.range());
        let history = Rc::new(history);
        self.entries.borrow_mut().insert(key, Rc::clone(&history));
        history
    }

    /// Returns true if an entry exists for `(symbol, range)`.
    #[must_use]
    pub fn contains(&self, symbol: &str, range: DateRange) -> bool {
        self.entries
            .borrow()
            .contains_key(&HistoryKey::new(symbol, range))
    }

    /// Number of cached histories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Drops every entry.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}
