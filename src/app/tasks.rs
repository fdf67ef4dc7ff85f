//! Synchronous execution of store tasks. The runtime calls this from the
//! blocking pool; tests call it inline.

use crate::pattern::KeyPattern;
use crate::search::sorted_group_counts;
use crate::store::{Store, SCAN_PAGE_SIZE};

use super::actions::{AppAction, TaskResult};

/// Run one store task. Returns `None` for actions that do not touch the store.
pub fn execute(store: &dyn Store, action: AppAction) -> Option<TaskResult> {
    let result = match action {
        AppAction::LoadKeys {
            after,
            limit,
            generation,
        } => TaskResult::Keys {
            result: store.list_page(&after, limit).map_err(|e| e.to_string()),
            after,
            generation,
        },
        AppAction::LoadValue { key, purpose } => TaskResult::Value {
            result: store.get(&key).map_err(|e| e.to_string()),
            key,
            purpose,
        },
        AppAction::CountMatching { term } => TaskResult::Count {
            result: store.count_matching(&term).map_err(|e| e.to_string()),
            term,
        },
        AppAction::LoadGroupCounts => TaskResult::GroupCounts(
            store
                .group_counts()
                .map(sorted_group_counts)
                .map_err(|e| e.to_string()),
        ),
        AppAction::SaveValue { key, bytes } => TaskResult::Saved {
            result: store.set(&key, &bytes).map_err(|e| e.to_string()),
            key,
        },
        AppAction::DeleteKey { key } => TaskResult::Deleted {
            result: store.delete(&key).map_err(|e| e.to_string()),
            key,
        },
        AppAction::DeletePattern { pattern } => delete_matching(store, pattern),
        AppAction::SaveConfig => return None,
    };
    Some(result)
}

/// Sweep the whole keyspace and delete every key the glob matches. Stops at
/// the first failure, reporting what was already deleted.
fn delete_matching(store: &dyn Store, pattern: String) -> TaskResult {
    let matcher = match KeyPattern::new(&pattern) {
        Ok(m) => m,
        Err(e) => {
            return TaskResult::PatternDeleted {
                pattern,
                deleted: Vec::new(),
                error: Some(e.to_string()),
            }
        }
    };

    let mut deleted = Vec::new();
    let mut after = String::new();
    let error = loop {
        let page = match store.list_page(&after, SCAN_PAGE_SIZE) {
            Ok(page) => page,
            Err(e) => break Some(e.to_string()),
        };
        let mut failed = None;
        for key in page.items.iter().filter(|k| matcher.is_match(k)) {
            if let Err(e) = store.delete(key) {
                failed = Some(e.to_string());
                break;
            }
            deleted.push(key.clone());
        }
        if failed.is_some() {
            break failed;
        }
        if !page.has_more || page.items.is_empty() {
            break None;
        }
        after = page.cursor_after;
    };

    TaskResult::PatternDeleted {
        pattern,
        deleted,
        error,
    }
}
