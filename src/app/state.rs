//! Application state types.

use crate::codec::{self, DisplayValue, ValueFormat};
use crate::search::GroupCount;

use super::actions::AppAction;

/// Styling class of the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Ok,
    Warn,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
}

/// Status line plus the side effects queued by the last event.
#[derive(Debug)]
pub struct UiFeedback {
    pub status: StatusMessage,
    pub pending_actions: Vec<AppAction>,
}

impl UiFeedback {
    pub fn new() -> Self {
        Self {
            status: StatusMessage {
                kind: StatusKind::Info,
                text: "Loading keys...".into(),
            },
            pending_actions: Vec::new(),
        }
    }

    pub fn set(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.status = StatusMessage {
            kind,
            text: text.into(),
        };
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.set(StatusKind::Info, text);
    }

    pub fn ok(&mut self, text: impl Into<String>) {
        self.set(StatusKind::Ok, text);
    }

    pub fn warn(&mut self, text: impl Into<String>) {
        self.set(StatusKind::Warn, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.set(StatusKind::Error, text);
    }

    pub fn push(&mut self, action: AppAction) {
        self.pending_actions.push(action);
    }

    pub fn extend(&mut self, action: Option<AppAction>) {
        self.pending_actions.extend(action);
    }
}

impl Default for UiFeedback {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    Off,
    /// Input line open; the list narrows as the user types.
    Typing,
    /// Input closed, filter still narrowing the list.
    Applied,
}

/// Fuzzy filter over the key list, plus the full-scan match count for the
/// applied term.
#[derive(Debug, Default)]
pub struct FilterSession {
    pub mode: FilterMode,
    pub input: String,
    pub match_count: Option<usize>,
    pub count_loading: bool,
    pub count_error: Option<String>,
    /// Term the last count was issued for.
    pub counted_term: String,
    /// True while the browser sweeps every page so the filter sees all keys.
    pub loading_all: bool,
}

impl FilterSession {
    /// Trimmed term currently narrowing the list, empty when none.
    pub fn term(&self) -> &str {
        match self.mode {
            FilterMode::Off => "",
            FilterMode::Typing | FilterMode::Applied => self.input.trim(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.term().is_empty()
    }

    pub fn is_typing(&self) -> bool {
        self.mode == FilterMode::Typing
    }

    pub fn begin(&mut self) {
        self.mode = FilterMode::Typing;
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Close the input line. An empty term turns the filter off.
    pub fn apply(&mut self) {
        if self.term().is_empty() {
            self.clear();
        } else {
            self.mode = FilterMode::Applied;
        }
    }

    /// Bring count bookkeeping in line with the current term. Returns a
    /// count task when the applied term has not been counted yet.
    pub fn sync(&mut self) -> Option<AppAction> {
        let term = self.term().to_string();
        if term.is_empty() {
            self.match_count = None;
            self.count_loading = false;
            self.count_error = None;
            self.counted_term.clear();
            self.loading_all = false;
            return None;
        }
        self.loading_all = true;
        if self.mode != FilterMode::Applied {
            return None;
        }
        let settled = term == self.counted_term && self.match_count.is_some() && !self.count_loading;
        if settled || (self.count_loading && term == self.counted_term) {
            return None;
        }
        self.counted_term = term.clone();
        self.count_loading = true;
        self.count_error = None;
        self.match_count = None;
        Some(AppAction::CountMatching { term })
    }

    /// Store a count result. Returns false when the term has since changed.
    pub fn apply_count(&mut self, term: &str, result: Result<usize, String>) -> bool {
        if term != self.term() {
            return false;
        }
        self.count_loading = false;
        match result {
            Ok(n) => {
                self.match_count = Some(n);
                self.count_error = None;
            }
            Err(e) => {
                self.match_count = None;
                self.count_error = Some(e);
            }
        }
        true
    }
}

/// Read-only value pane: the raw bytes of the selected key and their
/// rendering in the active format.
#[derive(Debug, Default)]
pub struct ValuePane {
    pub key: Option<String>,
    pub raw: Option<Vec<u8>>,
    pub display: Option<DisplayValue>,
    pub error: Option<String>,
    pub scroll: usize,
}

impl ValuePane {
    /// Point the pane at `key` ahead of its value arriving.
    pub fn select(&mut self, key: &str) {
        if self.key.as_deref() != Some(key) {
            *self = Self {
                key: Some(key.to_string()),
                ..Self::default()
            };
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn show(&mut self, format: ValueFormat, bytes: Vec<u8>) {
        self.display = Some(codec::display(format, &bytes));
        self.raw = Some(bytes);
        self.error = None;
        self.scroll = 0;
    }

    pub fn fail(&mut self, message: String) {
        self.raw = None;
        self.display = None;
        self.error = Some(message);
        self.scroll = 0;
    }

    /// Re-render cached bytes after a format change.
    pub fn redecode(&mut self, format: ValueFormat) {
        if let Some(raw) = &self.raw {
            self.display = Some(codec::display(format, raw));
            self.scroll = 0;
        }
    }

    pub fn is_loading(&self) -> bool {
        self.key.is_some() && self.raw.is_none() && self.error.is_none()
    }

    /// Logical lines of the rendered value. A trailing newline adds no row.
    pub fn lines(&self) -> Vec<Vec<char>> {
        let Some(display) = &self.display else {
            return Vec::new();
        };
        let text = display.text.strip_suffix('\n').unwrap_or(&display.text);
        text.split('\n').map(|l| l.chars().collect()).collect()
    }
}

/// Prefix-group overlay.
#[derive(Debug, Default)]
pub struct GroupView {
    pub visible: bool,
    pub loading: bool,
    pub counts: Vec<GroupCount>,
    pub error: Option<String>,
    pub scroll: usize,
}

/// Key list viewport: selection index into the visible keys, plus the
/// first row drawn.
#[derive(Debug, Default, Clone, Copy)]
pub struct ListView {
    pub selected: usize,
    pub offset: usize,
}
