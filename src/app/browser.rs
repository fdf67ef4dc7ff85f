//! Cursor-based key pagination with prefetch.

use std::collections::HashSet;

use crate::store::KeyPage;

use super::actions::AppAction;

/// Rows from the end of the loaded keys at which the next page is fetched.
pub const PREFETCH_THRESHOLD: usize = 5;

/// What happened to a page result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Appended(usize),
    Failed(String),
    /// The result was for a cursor or fetch that no longer applies.
    Stale,
}

/// Keys loaded so far plus the cursor to continue from. At most one page
/// fetch is outstanding per generation; `reset` starts a new generation so
/// a page still in flight from before it is dropped on arrival.
#[derive(Debug, Clone)]
pub struct KeyBrowser {
    keys: Vec<String>,
    last_cursor: String,
    generation: u64,
    has_more: bool,
    loading: bool,
    page_size: usize,
}

impl KeyBrowser {
    pub fn new(page_size: usize) -> Self {
        Self {
            keys: Vec::new(),
            last_cursor: String::new(),
            generation: 0,
            has_more: true,
            loading: false,
            page_size: page_size.max(1),
        }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub const fn has_more(&self) -> bool {
        self.has_more
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// Start the next page fetch unless one is running or the end was reached.
    pub fn request_page(&mut self) -> Option<AppAction> {
        if !self.has_more || self.loading {
            return None;
        }
        self.loading = true;
        Some(AppAction::LoadKeys {
            after: self.last_cursor.clone(),
            limit: self.page_size,
            generation: self.generation,
        })
    }

    /// Fetch ahead when `selected` is within [`PREFETCH_THRESHOLD`] rows of
    /// the last loaded key.
    pub fn prefetch(&mut self, selected: usize) -> Option<AppAction> {
        let near_end = self.keys.is_empty()
            || selected + 1 + PREFETCH_THRESHOLD >= self.keys.len();
        if near_end {
            self.request_page()
        } else {
            None
        }
    }

    pub fn apply_page(
        &mut self,
        generation: u64,
        after: &str,
        result: Result<KeyPage, String>,
    ) -> PageOutcome {
        if generation != self.generation || !self.loading || after != self.last_cursor {
            return PageOutcome::Stale;
        }
        self.loading = false;
        let page = match result {
            Ok(page) => page,
            Err(e) => {
                self.has_more = false;
                return PageOutcome::Failed(e);
            }
        };
        let before = self.keys.len();
        let boundary = self.keys.last().cloned();
        self.keys.extend(
            page.items
                .into_iter()
                .skip_while(|k| boundary.as_ref() == Some(k)),
        );
        if self.keys.len() > before {
            self.last_cursor = page.cursor_after;
        }
        self.has_more = page.has_more;
        PageOutcome::Appended(self.keys.len() - before)
    }

    /// Drop a deleted key, returning where it was.
    pub fn remove(&mut self, key: &str) -> Option<usize> {
        let idx = self.keys.iter().position(|k| k == key)?;
        self.keys.remove(idx);
        Some(idx)
    }

    pub fn remove_all(&mut self, keys: &HashSet<&str>) -> usize {
        let before = self.keys.len();
        self.keys.retain(|k| !keys.contains(k.as_str()));
        before - self.keys.len()
    }

    /// Forget everything and start again from the beginning of the keyspace.
    /// A fetch still in flight comes back stale.
    pub fn reset(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.keys.clear();
        self.last_cursor.clear();
        self.has_more = true;
        self.loading = false;
    }
}
