//! Store adapter contract and the adapters that satisfy it.

pub mod error;
mod memory;
mod sqlite;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use std::collections::HashMap;

use crate::search::{fuzzy_match, group_label};

/// Page size used by full-keyspace sweeps.
pub const SCAN_PAGE_SIZE: usize = 1000;

/// One page of keys in store order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPage {
    pub items: Vec<String>,
    /// Last key of `items`, or empty when the page is empty.
    pub cursor_after: String,
    pub has_more: bool,
}

impl KeyPage {
    /// Build a page from an ordered key iterator that yielded up to `limit + 1`
    /// keys; the extra key only signals that more remain.
    pub fn from_probe(mut items: Vec<String>, limit: usize) -> Self {
        let has_more = items.len() > limit;
        items.truncate(limit);
        let cursor_after = items.last().cloned().unwrap_or_default();
        Self {
            items,
            cursor_after,
            has_more,
        }
    }
}

/// Everything the browser needs from a sorted key-value store.
///
/// Each call is independent and may be slow; the app always invokes these
/// from the blocking pool, never from the event loop.
pub trait Store: Send + Sync {
    /// Up to `limit` keys strictly greater than `after` (`""` = from the start).
    fn list_page(&self, after: &str, limit: usize) -> Result<KeyPage>;

    fn get(&self, key: &str) -> Result<Vec<u8>>;

    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    fn delete(&self, key: &str) -> Result<()>;

    /// Visit every key in store order.
    fn for_each_key(&self, visit: &mut dyn FnMut(&str)) -> Result<()> {
        let mut after = String::new();
        loop {
            let page = self.list_page(&after, SCAN_PAGE_SIZE)?;
            for key in &page.items {
                visit(key);
            }
            if !page.has_more || page.items.is_empty() {
                return Ok(());
            }
            after = page.cursor_after;
        }
    }

    /// Number of keys matching the fuzzy filter `term`. An empty term counts
    /// nothing rather than everything.
    fn count_matching(&self, term: &str) -> Result<usize> {
        let term = term.trim();
        if term.is_empty() {
            return Ok(0);
        }
        let pattern: Vec<char> = term.chars().collect();
        let mut count = 0;
        self.for_each_key(&mut |key| {
            if fuzzy_match(&pattern, key) {
                count += 1;
            }
        })?;
        Ok(count)
    }

    /// Key count per group label, in one pass.
    fn group_counts(&self) -> Result<HashMap<String, usize>> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        self.for_each_key(&mut |key| {
            *counts.entry(group_label(key).to_string()).or_insert(0) += 1;
        })?;
        Ok(counts)
    }
}
