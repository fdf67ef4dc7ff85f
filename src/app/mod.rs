//! Application state and key handling.

mod actions;
mod browser;
mod editor;
mod panels;
mod state;
pub mod tasks;

pub use actions::{AppAction, TaskResult, ValuePurpose};
pub use browser::{KeyBrowser, PageOutcome, PREFETCH_THRESHOLD};
pub use editor::EditSession;
pub use panels::Mode;
pub use state::{
    FilterMode, FilterSession, GroupView, ListView, StatusKind, StatusMessage, UiFeedback,
    ValuePane,
};

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;

use crate::codec::ValueFormat;
use crate::config::AppConfig;
use crate::pattern::KeyPattern;
use crate::search::fuzzy_match;
use crate::text::{layout_lines, scroll_to_cursor};
use crate::ui::{layout, theme};

/// Max characters to show in clipboard preview messages
const CLIPBOARD_PREVIEW_LEN: usize = 40;
const LOADING_KEYS: &str = "Loading keys...";

pub struct App {
    pub running: bool,
    pub mode: Mode,
    /// Mode a prompt returns to when it closes.
    resume: Mode,
    pub format: ValueFormat,

    pub browser: KeyBrowser,
    pub list: ListView,
    pub filter: FilterSession,
    pub value: ValuePane,
    pub edit: Option<EditSession>,
    /// Key whose value is being fetched to open the editor.
    pending_edit: Option<String>,

    pub groups: GroupView,
    pub show_about: bool,
    pub pattern_input: String,

    pub feedback: UiFeedback,
    /// Where the keys come from, shown in the header.
    pub source: String,
    pub viewport: Rect,
    pub config: AppConfig,
}

impl App {
    pub fn new(source: String, config: AppConfig, page_size: usize, format: ValueFormat) -> Self {
        Self {
            running: true,
            mode: Mode::Browsing,
            resume: Mode::Browsing,
            format,
            browser: KeyBrowser::new(page_size),
            list: ListView::default(),
            filter: FilterSession::default(),
            value: ValuePane::default(),
            edit: None,
            pending_edit: None,
            groups: GroupView::default(),
            show_about: false,
            pattern_input: String::new(),
            feedback: UiFeedback::new(),
            source,
            viewport: Rect::new(0, 0, 80, 24),
            config,
        }
    }

    /// Queue the first page fetch.
    pub fn start(&mut self) {
        self.feedback.info(LOADING_KEYS);
        let fetch = self.browser.request_page();
        self.feedback.extend(fetch);
    }

    /// Drain the tasks queued since the last call.
    pub fn take_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.feedback.pending_actions)
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Rect::new(0, 0, width, height);
        self.after_event();
    }

    // --- Derived views ---

    /// Indices into the loaded keys that pass the fuzzy filter.
    pub fn visible_indices(&self) -> Vec<usize> {
        let term: Vec<char> = self.filter.term().chars().collect();
        let keys = self.browser.keys();
        if term.is_empty() {
            return (0..keys.len()).collect();
        }
        keys.iter()
            .enumerate()
            .filter(|(_, k)| fuzzy_match(&term, k))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn selected_key(&self) -> Option<&str> {
        let indices = self.visible_indices();
        let &idx = indices.get(self.list.selected)?;
        self.browser.keys().get(idx).map(String::as_str)
    }

    /// Rows available to the key list.
    pub fn key_list_area(&self) -> Rect {
        let areas = layout::compute_layout(self.viewport);
        layout::key_rows(layout::inner(areas.keys), self.filter.mode != FilterMode::Off)
    }

    /// Text area of the read-only value pane.
    pub fn value_text_area(&self) -> Rect {
        let areas = layout::compute_layout(self.viewport);
        let has_warning = self
            .value
            .display
            .as_ref()
            .is_some_and(|d| d.warning.is_some());
        layout::value_text(layout::inner(areas.value), has_warning)
    }

    /// Wrap width and height of the editor text area.
    pub fn editor_text_size(&self) -> (usize, usize) {
        let Some(edit) = &self.edit else {
            return (1, 0);
        };
        let areas = layout::compute_layout(self.viewport);
        let has_message = edit.warning.is_some() || edit.error.is_some();
        let editor = layout::editor_areas(
            layout::inner(areas.value),
            edit.buffer.line_count(),
            has_message,
        );
        (
            layout::editor_wrap_width(editor.text),
            usize::from(editor.text.height),
        )
    }

    // --- Key handling ---

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Layer 1: keys that work everywhere
        if key.code == KeyCode::F(1) {
            self.show_about = !self.show_about;
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.running = false;
            return;
        }

        // Layer 2: overlays consume all input
        if self.show_about {
            if key.code == KeyCode::Esc {
                self.show_about = false;
            }
            return;
        }
        if self.groups.visible {
            self.handle_groups_key(key);
            self.after_event();
            return;
        }

        // Layer 3: the active mode
        let was_browsing = self.mode == Mode::Browsing && !self.filter.is_typing();
        let before = self.selected_key().map(str::to_string);
        match self.mode.clone() {
            Mode::ConfirmSingleDelete(target) => self.handle_confirm_delete_key(key, target),
            Mode::ConfirmPatternDelete(pattern) => self.handle_confirm_pattern_key(key, pattern),
            Mode::PatternDeletePrompt => self.handle_pattern_prompt_key(key),
            Mode::Editing => self.handle_editing_key(key),
            Mode::ValueFocused => self.handle_value_key(key),
            Mode::Browsing if self.filter.is_typing() => self.handle_filter_key(key),
            Mode::Browsing => self.handle_browse_key(key),
        }
        self.after_event();

        // Moving the selection previews the newly selected key.
        if !was_browsing || self.mode != Mode::Browsing {
            return;
        }
        let Some(key) = self.selected_key().map(str::to_string) else {
            return;
        };
        if !key.is_empty() && before.as_deref() != Some(key.as_str()) {
            self.load_value(key, ValuePurpose::View);
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        if self.handle_list_nav(key.code) || self.handle_value_command(key) {
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Esc => {
                if self.filter.mode == FilterMode::Off {
                    self.running = false;
                } else {
                    self.filter.clear();
                    self.list.selected = 0;
                    self.feedback.info("Filter cleared.");
                }
            }
            KeyCode::Enter => {
                if let Some(selected) = self.selected_key().map(str::to_string) {
                    self.mode = Mode::ValueFocused;
                    self.pending_edit = None;
                    self.value.clear();
                    self.load_value(selected, ValuePurpose::View);
                }
            }
            KeyCode::Char('/') => {
                self.filter.begin();
                self.feedback.info("Filter. (Enter apply · Esc clear)");
            }
            KeyCode::Char('r') => self.reload_keys(),
            KeyCode::Char('y') => {
                if let Some(selected) = self.selected_key().map(str::to_string) {
                    self.copy_to_clipboard(&selected);
                }
            }
            _ => {}
        }
    }

    /// Selection movement in the key list. Returns true if handled.
    fn handle_list_nav(&mut self, code: KeyCode) -> bool {
        let len = self.visible_indices().len();
        let page = usize::from(self.key_list_area().height).max(1);
        let sel = &mut self.list.selected;
        match code {
            KeyCode::Up => *sel = sel.saturating_sub(1),
            KeyCode::Down => {
                if *sel + 1 < len {
                    *sel += 1;
                }
            }
            KeyCode::PageUp => *sel = sel.saturating_sub(page),
            KeyCode::PageDown => *sel = (*sel + page).min(len.saturating_sub(1)),
            KeyCode::Home => *sel = 0,
            KeyCode::End => *sel = len.saturating_sub(1),
            _ => return false,
        }
        true
    }

    /// Commands shared by the list and the value pane. Returns true if handled.
    fn handle_value_command(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c @ ('t' | 'h' | 'b' | 'j')) => {
                if let Some(format) = ValueFormat::from_key(c) {
                    self.set_format(format);
                }
            }
            KeyCode::Char('e') => self.begin_edit(),
            KeyCode::Char('d') | KeyCode::Delete => self.ask_delete(),
            KeyCode::Char('p') => {
                self.pattern_input.clear();
                self.open_prompt(Mode::PatternDeletePrompt);
                self.feedback
                    .info("Pattern delete mode. (Enter confirm · Esc cancel)");
            }
            KeyCode::Char('g') => self.toggle_groups(),
            KeyCode::Char('T') => self.cycle_theme(),
            _ => return false,
        }
        true
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.filter.clear();
                self.feedback.info("Filter cleared.");
            }
            KeyCode::Enter => {
                self.filter.apply();
                self.feedback.info(if self.filter.is_active() {
                    "Filter applied."
                } else {
                    "Filter cleared."
                });
            }
            KeyCode::Backspace => {
                self.filter.input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.filter.input.push(c);
            }
            _ => return,
        }
        self.list.selected = 0;
        self.list.offset = 0;
    }

    fn handle_value_key(&mut self, key: KeyEvent) {
        if self.handle_value_command(key) {
            return;
        }
        let page = usize::from(self.value_text_area().height).max(1);
        let scroll = self.value.scroll;
        match key.code {
            KeyCode::Esc => self.back_to_list(),
            KeyCode::Left if key.modifiers.contains(KeyModifiers::SHIFT) => self.back_to_list(),
            KeyCode::Up => self.value.scroll = scroll.saturating_sub(1),
            KeyCode::Down => self.value.scroll = scroll.saturating_add(1),
            KeyCode::PageUp => self.value.scroll = scroll.saturating_sub(page),
            KeyCode::PageDown => self.value.scroll = scroll.saturating_add(page),
            KeyCode::Home => self.value.scroll = 0,
            KeyCode::End => self.value.scroll = usize::MAX,
            KeyCode::Char('y') => {
                if let Some(text) = self.value.display.as_ref().map(|d| d.text.clone()) {
                    self.copy_to_clipboard(&text);
                }
            }
            _ => {}
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        let (width, height) = self.editor_text_size();
        let Some(edit) = self.edit.as_mut() else {
            self.mode = Mode::ValueFocused;
            return;
        };
        // The buffer is frozen until the write lands, so nothing typed is lost.
        if edit.saving {
            return;
        }
        match key.code {
            KeyCode::Esc => {
                self.edit = None;
                self.mode = Mode::ValueFocused;
                self.feedback.info("Edit canceled.");
            }
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                match edit.encode() {
                    Ok(bytes) => {
                        edit.saving = true;
                        let action = AppAction::SaveValue {
                            key: edit.key.clone(),
                            bytes,
                        };
                        self.feedback.push(action);
                        self.feedback.info("Saving...");
                    }
                    Err(e) => {
                        edit.error = Some(e.to_string());
                        self.feedback.error(format!("Error: save failed: {e}"));
                    }
                }
            }
            _ => {
                edit.handle_key(key, width, height);
            }
        }
    }

    fn handle_pattern_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.close_prompt();
                self.feedback.info("Pattern delete canceled.");
            }
            KeyCode::Enter => {
                let pattern = self.pattern_input.trim().to_string();
                if pattern.is_empty() {
                    self.close_prompt();
                    self.feedback.info("Pattern delete canceled.");
                    return;
                }
                if let Err(e) = KeyPattern::new(&pattern) {
                    self.feedback.error(format!("Error: {e}"));
                    return;
                }
                self.feedback
                    .warn(format!("Delete pattern '{pattern}'? (y/n)"));
                self.open_prompt(Mode::ConfirmPatternDelete(pattern));
            }
            KeyCode::Backspace => {
                self.pattern_input.pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.pattern_input.push(c);
            }
            _ => {}
        }
    }

    fn handle_confirm_delete_key(&mut self, key: KeyEvent, target: String) {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                self.close_prompt();
                self.feedback.info("Deleting...");
                self.feedback.push(AppAction::DeleteKey { key: target });
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                self.close_prompt();
                self.feedback.info("Delete canceled.");
            }
            _ => {}
        }
    }

    fn handle_confirm_pattern_key(&mut self, key: KeyEvent, pattern: String) {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                self.close_prompt();
                self.feedback.info("Deleting by pattern...");
                self.feedback.push(AppAction::DeletePattern { pattern });
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => {
                self.close_prompt();
                self.feedback.info("Pattern delete canceled.");
            }
            _ => {}
        }
    }

    fn handle_groups_key(&mut self, key: KeyEvent) {
        let scroll = &mut self.groups.scroll;
        match key.code {
            KeyCode::Char('g' | 'G') | KeyCode::Esc => self.groups.visible = false,
            KeyCode::Up => *scroll = scroll.saturating_sub(1),
            KeyCode::Down => *scroll = scroll.saturating_add(1),
            KeyCode::PageUp => *scroll = scroll.saturating_sub(10),
            KeyCode::PageDown => *scroll = scroll.saturating_add(10),
            KeyCode::Home => *scroll = 0,
            _ => {}
        }
    }

    // --- Commands ---

    fn open_prompt(&mut self, prompt: Mode) {
        if !self.mode.is_prompt() {
            self.resume = self.mode.clone();
        }
        self.mode = prompt;
    }

    fn close_prompt(&mut self) {
        self.mode = std::mem::replace(&mut self.resume, Mode::Browsing);
    }

    fn back_to_list(&mut self) {
        self.mode = Mode::Browsing;
        self.pending_edit = None;
        self.feedback.info("List focused.");
    }

    fn load_value(&mut self, key: String, purpose: ValuePurpose) {
        self.value.select(&key);
        tracing::debug!(%key, ?purpose, "loading value");
        self.feedback.push(AppAction::LoadValue { key, purpose });
    }

    /// Key the value-level commands act on.
    fn target_key(&self) -> Option<String> {
        match self.mode {
            Mode::Browsing => self.selected_key().map(str::to_string),
            _ => self.value.key.clone(),
        }
    }

    fn set_format(&mut self, format: ValueFormat) {
        self.format = format;
        self.value.redecode(format);
        self.feedback.info(format!("Format: {}", format.label()));
    }

    fn begin_edit(&mut self) {
        let Some(key) = self.target_key() else {
            return;
        };
        self.mode = Mode::ValueFocused;
        self.pending_edit = Some(key.clone());
        self.feedback.info("Loading...");
        self.load_value(key, ValuePurpose::Edit);
    }

    fn ask_delete(&mut self) {
        let Some(key) = self.target_key() else {
            return;
        };
        self.feedback.warn(format!("Delete '{key}'? (y/n)"));
        self.open_prompt(Mode::ConfirmSingleDelete(key));
    }

    fn toggle_groups(&mut self) {
        self.groups.visible = !self.groups.visible;
        if !self.groups.visible || self.groups.loading {
            return;
        }
        self.groups.loading = true;
        self.groups.error = None;
        self.groups.scroll = 0;
        self.feedback.push(AppAction::LoadGroupCounts);
    }

    fn reload_keys(&mut self) {
        self.browser.reset();
        self.list = ListView::default();
        self.filter.counted_term.clear();
        self.filter.match_count = None;
        self.filter.count_loading = false;
        self.feedback.info(LOADING_KEYS);
        let fetch = self.browser.request_page();
        self.feedback.extend(fetch);
    }

    fn cycle_theme(&mut self) {
        self.config.color_theme = self.config.color_theme.next();
        theme::set_theme(self.config.color_theme.colors());
        self.feedback
            .info(format!("Theme: {}", self.config.color_theme.label()));
        self.feedback.push(AppAction::SaveConfig);
    }

    fn copy_to_clipboard(&mut self, text: &str) {
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text)) {
            Ok(()) => {
                let preview: String = text.chars().take(CLIPBOARD_PREVIEW_LEN).collect();
                let suffix = if text.chars().count() > CLIPBOARD_PREVIEW_LEN {
                    "..."
                } else {
                    ""
                };
                self.feedback.ok(format!("Copied: {preview}{suffix}"));
            }
            Err(e) => {
                self.feedback.error(format!("Clipboard error: {e}"));
            }
        }
    }

    // --- Task results ---

    pub fn apply_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Keys {
                after,
                generation,
                result,
            } => match self.browser.apply_page(generation, &after, result) {
                PageOutcome::Stale => {
                    tracing::debug!(%after, generation, "dropping stale key page");
                }
                PageOutcome::Failed(e) => {
                    tracing::warn!(error = %e, "key page failed");
                    self.feedback.error(format!("Error: failed to load keys: {e}"));
                }
                PageOutcome::Appended(n) => {
                    tracing::debug!(appended = n, total = self.browser.len(), "key page loaded");
                    if self.feedback.status.text == LOADING_KEYS {
                        self.feedback.info("Ready.");
                    }
                }
            },
            TaskResult::Value {
                key,
                purpose,
                result,
            } => self.apply_value(key, purpose, result),
            TaskResult::Count { term, result } => {
                if !self.filter.apply_count(&term, result) {
                    tracing::debug!(%term, "dropping stale match count");
                }
            }
            TaskResult::GroupCounts(result) => {
                self.groups.loading = false;
                match result {
                    Ok(counts) => {
                        self.groups.counts = counts;
                        self.groups.error = None;
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "group counts failed");
                        self.groups.error = Some(e);
                    }
                }
            }
            TaskResult::Saved { key, result } => self.apply_saved(key, result),
            TaskResult::Deleted { key, result } => match result {
                Ok(()) => {
                    self.forget_keys(&HashSet::from([key.as_str()]));
                    self.clear_selection();
                    self.feedback.ok(format!("'{key}' deleted."));
                }
                Err(e) => {
                    tracing::warn!(%key, error = %e, "delete failed");
                    self.feedback.error(format!("Error: delete failed: {e}"));
                }
            },
            TaskResult::PatternDeleted {
                pattern,
                deleted,
                error,
            } => {
                let gone: HashSet<&str> = deleted.iter().map(String::as_str).collect();
                self.forget_keys(&gone);
                match error {
                    Some(e) if deleted.is_empty() => {
                        tracing::warn!(%pattern, error = %e, "pattern delete failed");
                        self.feedback
                            .error(format!("Error: pattern delete failed: {e}"));
                    }
                    Some(e) => {
                        tracing::warn!(%pattern, deleted = deleted.len(), error = %e, "pattern delete stopped");
                        self.feedback.error(format!(
                            "Error: pattern delete failed after {} records: {e}",
                            deleted.len()
                        ));
                    }
                    None if deleted.is_empty() => {
                        self.feedback
                            .warn(format!("Warning: no matches for pattern: {pattern}"));
                    }
                    None => {
                        self.feedback.ok(format!(
                            "Deleted {} records (pattern: {pattern}).",
                            deleted.len()
                        ));
                    }
                }
            }
        }
        self.after_event();
    }

    fn apply_value(&mut self, key: String, purpose: ValuePurpose, result: Result<Vec<u8>, String>) {
        if purpose == ValuePurpose::Edit && self.pending_edit.as_deref() == Some(key.as_str()) {
            self.pending_edit = None;
            match result {
                Ok(bytes) => {
                    self.open_editor(&key, &bytes);
                    if self.value.key.as_deref() == Some(key.as_str()) {
                        self.value.show(self.format, bytes);
                    }
                }
                Err(e) => {
                    tracing::warn!(%key, error = %e, "value load for edit failed");
                    self.feedback.error(format!("Error: {e}"));
                    self.value.fail(format!("Error: {e}"));
                }
            }
            return;
        }
        if self.value.key.as_deref() != Some(key.as_str()) {
            tracing::debug!(%key, "dropping stale value");
            return;
        }
        match result {
            Ok(bytes) => self.value.show(self.format, bytes),
            Err(e) => {
                tracing::warn!(%key, error = %e, "value load failed");
                self.value.fail(format!("Error: {e}"));
            }
        }
    }

    fn open_editor(&mut self, key: &str, bytes: &[u8]) {
        if self.mode != Mode::ValueFocused || self.edit.is_some() {
            return;
        }
        match EditSession::open(key.to_string(), self.format, bytes) {
            Ok(session) => {
                self.edit = Some(session);
                self.mode = Mode::Editing;
                self.feedback.info("Editing. (Ctrl+S save · Esc cancel)");
            }
            Err(e) => {
                self.feedback.error(format!(
                    "Error: cannot edit as {}: {e}. Switch to hex (h) or base64 (b).",
                    self.format.label()
                ));
            }
        }
    }

    fn apply_saved(&mut self, key: String, result: Result<(), String>) {
        let Some(edit) = self.edit.as_mut().filter(|e| e.key == key && e.saving) else {
            tracing::debug!(%key, "save result without matching edit session");
            return;
        };
        match result {
            Ok(()) => {
                self.edit = None;
                self.mode = Mode::ValueFocused;
                self.feedback.ok(format!("'{key}' updated."));
                self.value.clear();
                self.load_value(key, ValuePurpose::View);
            }
            Err(e) => {
                tracing::warn!(%key, error = %e, "save failed");
                edit.saving = false;
                edit.error = Some(e.clone());
                self.feedback.error(format!("Error: save failed: {e}"));
            }
        }
    }

    /// Drop deleted keys from the list and the value pane.
    fn forget_keys(&mut self, keys: &HashSet<&str>) {
        if keys.is_empty() {
            return;
        }
        self.browser.remove_all(keys);
        let shown = self.value.key.as_deref().is_some_and(|k| keys.contains(k));
        if shown {
            self.value.clear();
            if self.mode == Mode::ValueFocused {
                self.mode = Mode::Browsing;
            }
        }
    }

    /// Empty the value pane and leave the list cursor on the row that slid
    /// into the deleted key's place. Nothing is previewed until it moves.
    fn clear_selection(&mut self) {
        self.value.clear();
        self.pending_edit = None;
        if self.mode == Mode::ValueFocused {
            self.mode = Mode::Browsing;
        }
    }

    // --- Bookkeeping after every event ---

    /// Clamp selection and scroll offsets, then queue whatever fetches the
    /// new state needs.
    pub fn after_event(&mut self) {
        let visible = self.visible_indices().len();
        self.list.selected = self.list.selected.min(visible.saturating_sub(1));

        let count = self.filter.sync();
        self.feedback.extend(count);

        let fetch = if self.filter.is_active() || self.groups.visible {
            self.browser.request_page()
        } else {
            self.browser.prefetch(self.list.selected)
        };
        if let Some(action) = &fetch {
            tracing::debug!(?action, "fetching keys");
        }
        self.feedback.extend(fetch);

        let list_height = usize::from(self.key_list_area().height);
        self.list.offset =
            scroll_to_cursor(self.list.offset, self.list.selected, list_height, visible);

        let value_area = self.value_text_area();
        let value_rows = layout_lines(&self.value.lines(), usize::from(value_area.width)).len();
        let max_scroll = value_rows.saturating_sub(usize::from(value_area.height));
        self.value.scroll = self.value.scroll.min(max_scroll);

        self.groups.scroll = self
            .groups
            .scroll
            .min(self.groups.counts.len().saturating_sub(1));

        let (width, height) = self.editor_text_size();
        if let Some(edit) = self.edit.as_mut() {
            edit.ensure_visible(width, height);
        }
    }
}

#[cfg(test)]
mod tests;
