//! Side effects requested by the App and the results that come back.

use crate::search::GroupCount;
use crate::store::KeyPage;

/// Why a value was fetched; edit loads open the editor when they land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValuePurpose {
    View,
    Edit,
}

/// Work for the runtime. Store tasks run off the event loop; the rest are
/// handled inline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppAction {
    LoadKeys {
        after: String,
        limit: usize,
        /// Browser generation the page belongs to; bumped on reload.
        generation: u64,
    },
    LoadValue { key: String, purpose: ValuePurpose },
    CountMatching { term: String },
    LoadGroupCounts,
    SaveValue { key: String, bytes: Vec<u8> },
    DeleteKey { key: String },
    DeletePattern { pattern: String },
    SaveConfig,
}

/// Completion of a store task, tagged with what it was requested for so
/// the App can drop results that no longer apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskResult {
    Keys {
        after: String,
        generation: u64,
        result: Result<KeyPage, String>,
    },
    Value {
        key: String,
        purpose: ValuePurpose,
        result: Result<Vec<u8>, String>,
    },
    Count {
        term: String,
        result: Result<usize, String>,
    },
    GroupCounts(Result<Vec<GroupCount>, String>),
    Saved {
        key: String,
        result: Result<(), String>,
    },
    Deleted {
        key: String,
        result: Result<(), String>,
    },
    PatternDeleted {
        pattern: String,
        deleted: Vec<String>,
        error: Option<String>,
    },
}
