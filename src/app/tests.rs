//! Tests for App state and key handling.

use super::*;
use crate::store::{MemoryStore, Store};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn key_ctrl(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::CONTROL)
}

fn chr(c: char) -> KeyEvent {
    key(KeyCode::Char(c))
}

/// Run queued tasks against `store` until the app stops asking for more.
fn settle(app: &mut App, store: &MemoryStore) {
    for _ in 0..10_000 {
        let actions = app.take_actions();
        if actions.is_empty() {
            return;
        }
        for action in actions {
            if let Some(result) = tasks::execute(store, action) {
                app.apply_result(result);
            }
        }
    }
    panic!("app never settled");
}

fn press(app: &mut App, store: &MemoryStore, event: KeyEvent) {
    app.handle_key(event);
    settle(app, store);
}

fn type_text(app: &mut App, store: &MemoryStore, text: &str) {
    for c in text.chars() {
        press(app, store, chr(c));
    }
}

fn make_app(store: &MemoryStore, page_size: usize) -> App {
    let mut app = App::new("memory".into(), AppConfig::default(), page_size, ValueFormat::Json);
    app.start();
    settle(&mut app, store);
    app
}

fn numbered(n: usize) -> MemoryStore {
    MemoryStore::from_pairs((0..n).map(|i| (format!("k{i:03}"), format!("{i}"))))
}

fn status(app: &App) -> &str {
    &app.feedback.status.text
}

// ─────────────────────────────────────────────────────────────────────────────
// Global keys
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn q_quits_from_list() {
    let store = numbered(3);
    let mut app = make_app(&store, 10);
    assert!(app.running);
    press(&mut app, &store, chr('q'));
    assert!(!app.running);
}

#[test]
fn ctrl_c_quits_while_editing() {
    let store = MemoryStore::from_pairs([("k", "v")]);
    let mut app = make_app(&store, 10);
    press(&mut app, &store, chr('t'));
    press(&mut app, &store, chr('e'));
    assert_eq!(app.mode, Mode::Editing);
    press(&mut app, &store, key_ctrl(KeyCode::Char('c')));
    assert!(!app.running);
}

#[test]
fn about_overlay_suspends_keys() {
    let store = numbered(3);
    let mut app = make_app(&store, 10);
    press(&mut app, &store, key(KeyCode::F(1)));
    assert!(app.show_about);
    press(&mut app, &store, chr('q'));
    assert!(app.running, "q is swallowed by the overlay");
    press(&mut app, &store, key(KeyCode::Esc));
    assert!(!app.show_about);
    press(&mut app, &store, key(KeyCode::F(1)));
    press(&mut app, &store, key(KeyCode::F(1)));
    assert!(!app.show_about);
}

// ─────────────────────────────────────────────────────────────────────────────
// Pagination
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn start_loads_one_page() {
    let store = numbered(100);
    let app = make_app(&store, 10);
    assert_eq!(app.browser.len(), 10);
    assert!(app.browser.has_more());
    assert_eq!(status(&app), "Ready.");
}

#[test]
fn scrolling_near_the_end_prefetches() {
    let store = numbered(100);
    let mut app = make_app(&store, 10);
    for _ in 0..3 {
        press(&mut app, &store, key(KeyCode::Down));
    }
    assert_eq!(app.browser.len(), 10);
    press(&mut app, &store, key(KeyCode::Down));
    assert_eq!(app.list.selected, 4);
    assert_eq!(app.browser.len(), 20);
}

#[test]
fn paging_reaches_every_key_in_order() {
    let store = numbered(57);
    let mut app = make_app(&store, 7);
    while app.browser.has_more() {
        press(&mut app, &store, key(KeyCode::End));
    }
    assert_eq!(app.browser.keys(), store.keys().as_slice());
}

#[test]
fn failed_page_reports_and_stops() {
    let store = numbered(5);
    store.fail_list(true);
    let app = make_app(&store, 10);
    assert!(status(&app).starts_with("Error: failed to load keys:"));
    assert_eq!(app.feedback.status.kind, StatusKind::Error);
    assert!(!app.browser.has_more());
}

#[test]
fn reload_picks_up_new_keys() {
    let store = numbered(3);
    let mut app = make_app(&store, 10);
    store.set("a-new", b"x").unwrap();
    press(&mut app, &store, chr('r'));
    assert_eq!(app.browser.keys()[0], "a-new");
    assert_eq!(app.browser.len(), 4);
}

#[test]
fn reload_during_first_fetch_drops_the_older_page() {
    let store = numbered(3);
    let mut app = App::new("memory".into(), AppConfig::default(), 10, ValueFormat::Json);
    app.start();
    let first = app.take_actions();
    let before_reload = tasks::execute(&store, first[0].clone()).unwrap();

    store.set("a-new", b"x").unwrap();
    app.handle_key(chr('r'));
    let second = app.take_actions();
    assert_eq!(second.len(), 1);
    assert_ne!(first[0], second[0]);
    let after_reload = tasks::execute(&store, second[0].clone()).unwrap();

    app.apply_result(before_reload);
    assert!(app.browser.is_empty());
    assert!(app.browser.is_loading());

    app.apply_result(after_reload);
    assert_eq!(app.browser.keys()[0], "a-new");
    assert_eq!(app.browser.len(), 4);
    assert!(app.take_actions().is_empty());
}

#[test]
fn reload_result_first_then_older_page() {
    let store = numbered(3);
    let mut app = App::new("memory".into(), AppConfig::default(), 10, ValueFormat::Json);
    app.start();
    let first = app.take_actions();
    app.handle_key(chr('r'));
    let second = app.take_actions();
    store.set("a-new", b"x").unwrap();

    let older = tasks::execute(&store, first[0].clone()).unwrap();
    let newer = tasks::execute(&store, second[0].clone()).unwrap();
    app.apply_result(newer);
    app.apply_result(older);
    assert_eq!(app.browser.len(), 4);
    assert_eq!(app.browser.keys()[0], "a-new");
}

#[test]
fn list_offset_follows_selection() {
    let store = numbered(20);
    let mut app = make_app(&store, 50);
    app.resize(80, 10);
    assert_eq!(app.key_list_area().height, 5);
    for _ in 0..7 {
        press(&mut app, &store, key(KeyCode::Down));
    }
    assert_eq!(app.list.offset, 3);
    press(&mut app, &store, key(KeyCode::Home));
    assert_eq!(app.list.offset, 0);
}

// ─────────────────────────────────────────────────────────────────────────────
// Filter
// ─────────────────────────────────────────────────────────────────────────────

fn mixed_store() -> MemoryStore {
    let mut pairs = Vec::new();
    for i in 0..30 {
        pairs.push((format!("user:{i:02}"), "u".to_string()));
        pairs.push((format!("order:{i:02}"), "o".to_string()));
    }
    MemoryStore::from_pairs(pairs)
}

#[test]
fn typing_a_filter_sweeps_all_pages() {
    let store = mixed_store();
    let mut app = make_app(&store, 5);
    press(&mut app, &store, chr('/'));
    type_text(&mut app, &store, "usr");
    assert!(!app.browser.has_more());
    assert_eq!(app.visible_indices().len(), 30);
    assert_eq!(app.filter.match_count, None, "count waits for Enter");
}

#[test]
fn applied_filter_counts_matches() {
    let store = mixed_store();
    let mut app = make_app(&store, 5);
    press(&mut app, &store, chr('/'));
    type_text(&mut app, &store, "ORD");
    press(&mut app, &store, key(KeyCode::Enter));
    assert_eq!(app.filter.mode, FilterMode::Applied);
    assert_eq!(app.filter.match_count, Some(30));
    assert_eq!(app.selected_key(), Some("order:00"));
}

#[test]
fn esc_clears_applied_filter_before_quitting() {
    let store = mixed_store();
    let mut app = make_app(&store, 100);
    press(&mut app, &store, chr('/'));
    type_text(&mut app, &store, "user");
    press(&mut app, &store, key(KeyCode::Enter));
    press(&mut app, &store, key(KeyCode::Esc));
    assert!(app.running);
    assert_eq!(app.filter.mode, FilterMode::Off);
    assert_eq!(app.visible_indices().len(), 60);
    press(&mut app, &store, key(KeyCode::Esc));
    assert!(!app.running);
}

#[test]
fn filter_keys_are_text_not_commands() {
    let store = mixed_store();
    let mut app = make_app(&store, 100);
    press(&mut app, &store, chr('/'));
    type_text(&mut app, &store, "qd");
    assert!(app.running);
    assert_eq!(app.mode, Mode::Browsing);
    assert_eq!(app.filter.input, "qd");
}

// ─────────────────────────────────────────────────────────────────────────────
// Value pane
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn enter_focuses_and_shows_pretty_json() {
    let store = MemoryStore::from_pairs([("cfg", r#"{"a":1}"#)]);
    let mut app = make_app(&store, 10);
    press(&mut app, &store, key(KeyCode::Enter));
    assert_eq!(app.mode, Mode::ValueFocused);
    let display = app.value.display.as_ref().unwrap();
    assert_eq!(display.text, "{\n  \"a\": 1\n}");
    assert!(display.highlight);
}

#[test]
fn format_switch_redecodes_without_fetch() {
    let store = MemoryStore::from_pairs([("k", "hi")]);
    let mut app = make_app(&store, 10);
    press(&mut app, &store, key(KeyCode::Enter));
    app.handle_key(chr('b'));
    assert!(app
        .take_actions()
        .iter()
        .all(|a| !matches!(a, AppAction::LoadValue { .. })));
    assert_eq!(app.format, ValueFormat::Base64);
    assert_eq!(app.value.display.as_ref().unwrap().text, "aGk=");
}

#[test]
fn moving_selection_previews_value() {
    let store = MemoryStore::from_pairs([("a", "1"), ("b", "2")]);
    let mut app = make_app(&store, 10);
    app.handle_key(key(KeyCode::Down));
    assert!(app.take_actions().contains(&AppAction::LoadValue {
        key: "b".into(),
        purpose: ValuePurpose::View,
    }));
}

#[test]
fn stale_value_is_ignored() {
    let store = MemoryStore::from_pairs([("a", "1"), ("b", "2")]);
    let mut app = make_app(&store, 10);
    press(&mut app, &store, key(KeyCode::Enter));
    app.apply_result(TaskResult::Value {
        key: "b".into(),
        purpose: ValuePurpose::View,
        result: Ok(b"2".to_vec()),
    });
    assert_eq!(app.value.key.as_deref(), Some("a"));
    assert_eq!(app.value.raw.as_deref(), Some(b"1".as_slice()));
}

#[test]
fn esc_returns_focus_to_list() {
    let store = MemoryStore::from_pairs([("a", "1")]);
    let mut app = make_app(&store, 10);
    press(&mut app, &store, key(KeyCode::Enter));
    press(&mut app, &store, key(KeyCode::Esc));
    assert_eq!(app.mode, Mode::Browsing);
    assert_eq!(status(&app), "List focused.");
    assert!(app.running);
}

#[test]
fn missing_value_shows_error() {
    let store = MemoryStore::from_pairs([("a", "1")]);
    let mut app = make_app(&store, 10);
    store.delete("a").unwrap();
    press(&mut app, &store, key(KeyCode::Enter));
    assert!(app.value.error.as_deref().unwrap().contains("key not found"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Editing
// ─────────────────────────────────────────────────────────────────────────────

fn editing_text(store: &MemoryStore) -> App {
    let mut app = make_app(store, 10);
    press(&mut app, store, chr('t'));
    press(&mut app, store, chr('e'));
    assert_eq!(app.mode, Mode::Editing);
    app
}

#[test]
fn edit_then_cancel_leaves_store_untouched() {
    let store = MemoryStore::from_pairs([("k", "hello")]);
    let mut app = editing_text(&store);
    assert_eq!(status(&app), "Editing. (Ctrl+S save · Esc cancel)");
    type_text(&mut app, &store, "XYZ");
    assert!(app.edit.as_ref().unwrap().dirty);
    press(&mut app, &store, key(KeyCode::Esc));
    assert_eq!(app.mode, Mode::ValueFocused);
    assert!(app.edit.is_none());
    assert_eq!(status(&app), "Edit canceled.");
    assert_eq!(store.get("k").unwrap(), b"hello");
}

#[test]
fn save_writes_and_reloads() {
    let store = MemoryStore::from_pairs([("k", "hello")]);
    let mut app = editing_text(&store);
    type_text(&mut app, &store, "X");
    press(&mut app, &store, key_ctrl(KeyCode::Char('s')));
    assert_eq!(store.get("k").unwrap(), b"Xhello");
    assert_eq!(app.mode, Mode::ValueFocused);
    assert_eq!(status(&app), "'k' updated.");
    assert_eq!(app.value.display.as_ref().unwrap().text, "Xhello");
}

#[test]
fn keys_are_ignored_while_saving() {
    let store = MemoryStore::from_pairs([("k", "hello")]);
    let mut app = editing_text(&store);
    type_text(&mut app, &store, "X");
    app.handle_key(key_ctrl(KeyCode::Char('s')));
    assert!(app.edit.as_ref().unwrap().saving);

    app.handle_key(chr('Y'));
    app.handle_key(key(KeyCode::Esc));
    let edit = app.edit.as_ref().unwrap();
    assert_eq!(edit.buffer.value(), "Xhello");
    assert_eq!(app.mode, Mode::Editing);

    settle(&mut app, &store);
    assert_eq!(store.get("k").unwrap(), b"Xhello");
    assert_eq!(app.mode, Mode::ValueFocused);
    assert_eq!(status(&app), "'k' updated.");
}

#[test]
fn json_save_stores_canonical_form() {
    let store = MemoryStore::from_pairs([("k", r#"{"a":1}"#)]);
    let mut app = make_app(&store, 10);
    press(&mut app, &store, chr('e'));
    press(&mut app, &store, key_ctrl(KeyCode::Char('s')));
    assert_eq!(store.get("k").unwrap(), b"{\n  \"a\": 1\n}");
}

#[test]
fn invalid_json_save_stays_in_editor() {
    let store = MemoryStore::from_pairs([("k", r#"{"a":1}"#)]);
    let mut app = make_app(&store, 10);
    press(&mut app, &store, chr('e'));
    type_text(&mut app, &store, "{");
    press(&mut app, &store, key_ctrl(KeyCode::Char('s')));
    assert_eq!(app.mode, Mode::Editing);
    assert!(status(&app).starts_with("Error: save failed: JSON error at"));
    assert!(app.edit.as_ref().unwrap().error.is_some());
    assert_eq!(store.get("k").unwrap(), br#"{"a":1}"#);
}

#[test]
fn store_failure_on_save_keeps_session() {
    let store = MemoryStore::from_pairs([("k", "v")]);
    let mut app = editing_text(&store);
    store.fail_set(true);
    press(&mut app, &store, key_ctrl(KeyCode::Char('s')));
    assert_eq!(app.mode, Mode::Editing);
    let edit = app.edit.as_ref().unwrap();
    assert!(!edit.saving);
    assert!(status(&app).starts_with("Error: save failed:"));
}

#[test]
fn binary_value_refuses_text_edit() {
    let store = MemoryStore::from_pairs([("bin", vec![0xffu8, 0x00, 0xfe])]);
    let mut app = make_app(&store, 10);
    press(&mut app, &store, chr('e'));
    assert_eq!(app.mode, Mode::ValueFocused);
    assert!(app.edit.is_none());
    assert_eq!(app.feedback.status.kind, StatusKind::Error);
    assert!(status(&app).contains("hex"));

    press(&mut app, &store, chr('h'));
    press(&mut app, &store, chr('e'));
    assert_eq!(app.mode, Mode::Editing);
    assert_eq!(app.edit.as_ref().unwrap().buffer.value(), "ff00fe");
}

#[test]
fn format_keys_are_typed_while_editing() {
    let store = MemoryStore::from_pairs([("k", "")]);
    let mut app = editing_text(&store);
    type_text(&mut app, &store, "thbj");
    assert_eq!(app.format, ValueFormat::Text);
    assert_eq!(app.edit.as_ref().unwrap().buffer.value(), "thbj");
}

// ─────────────────────────────────────────────────────────────────────────────
// Single delete
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn delete_asks_then_removes() {
    let store = MemoryStore::from_pairs([("a", "1"), ("b", "2")]);
    let mut app = make_app(&store, 10);
    press(&mut app, &store, chr('d'));
    assert_eq!(app.mode, Mode::ConfirmSingleDelete("a".into()));
    assert_eq!(status(&app), "Delete 'a'? (y/n)");
    press(&mut app, &store, chr('y'));
    assert_eq!(app.mode, Mode::Browsing);
    assert_eq!(status(&app), "'a' deleted.");
    assert_eq!(app.browser.keys(), ["b"]);
    assert_eq!(store.keys(), vec!["b"]);
    assert_eq!(app.list.selected, 0);
    assert!(app.value.key.is_none());
    assert!(app.value.display.is_none());
}

#[test]
fn delete_clears_preview_and_keeps_row_position() {
    let store = MemoryStore::from_pairs([("a", "1"), ("b", "2"), ("c", "3")]);
    let mut app = make_app(&store, 10);
    press(&mut app, &store, key(KeyCode::Down));
    assert_eq!(app.value.key.as_deref(), Some("b"));
    press(&mut app, &store, chr('d'));
    press(&mut app, &store, chr('y'));
    assert_eq!(app.browser.keys(), ["a", "c"]);
    assert_eq!(app.list.selected, 1);
    assert_eq!(app.selected_key(), Some("c"));
    assert!(app.value.key.is_none());
    assert_eq!(app.mode, Mode::Browsing);
}

#[test]
fn delete_cancel_keeps_key() {
    let store = MemoryStore::from_pairs([("a", "1")]);
    let mut app = make_app(&store, 10);
    press(&mut app, &store, key(KeyCode::Delete));
    press(&mut app, &store, chr('N'));
    assert_eq!(status(&app), "Delete canceled.");
    assert_eq!(store.keys(), vec!["a"]);
}

#[test]
fn delete_from_value_pane_clears_it() {
    let store = MemoryStore::from_pairs([("a", "1"), ("b", "2")]);
    let mut app = make_app(&store, 10);
    press(&mut app, &store, key(KeyCode::Down));
    press(&mut app, &store, key(KeyCode::Enter));
    press(&mut app, &store, chr('d'));
    press(&mut app, &store, key(KeyCode::Enter));
    assert_eq!(store.keys(), vec!["a"]);
    assert_eq!(app.mode, Mode::Browsing);
    assert!(app.value.key.is_none());
    assert_eq!(app.list.selected, 0);
}

#[test]
fn other_keys_do_not_answer_prompt() {
    let store = MemoryStore::from_pairs([("a", "1")]);
    let mut app = make_app(&store, 10);
    press(&mut app, &store, chr('d'));
    press(&mut app, &store, chr('q'));
    assert!(app.running);
    assert_eq!(app.mode, Mode::ConfirmSingleDelete("a".into()));
}

// ─────────────────────────────────────────────────────────────────────────────
// Pattern delete
// ─────────────────────────────────────────────────────────────────────────────

fn records_store() -> MemoryStore {
    MemoryStore::from_pairs([("rec:1", "a"), ("rec:2", "b"), ("user:1", "c")])
}

#[test]
fn pattern_delete_removes_matches() {
    let store = records_store();
    let mut app = make_app(&store, 10);
    press(&mut app, &store, chr('p'));
    assert_eq!(status(&app), "Pattern delete mode. (Enter confirm · Esc cancel)");
    type_text(&mut app, &store, "rec:*");
    press(&mut app, &store, key(KeyCode::Enter));
    assert_eq!(app.mode, Mode::ConfirmPatternDelete("rec:*".into()));
    assert_eq!(status(&app), "Delete pattern 'rec:*'? (y/n)");
    press(&mut app, &store, chr('y'));
    assert_eq!(status(&app), "Deleted 2 records (pattern: rec:*).");
    assert_eq!(store.keys(), vec!["user:1"]);
    assert_eq!(app.browser.keys(), ["user:1"]);
}

#[test]
fn invalid_pattern_keeps_prompt_open() {
    let store = records_store();
    let mut app = make_app(&store, 10);
    press(&mut app, &store, chr('p'));
    type_text(&mut app, &store, "[rec");
    press(&mut app, &store, key(KeyCode::Enter));
    assert_eq!(app.mode, Mode::PatternDeletePrompt);
    assert!(status(&app).starts_with("Error: invalid pattern:"));
}

#[test]
fn empty_pattern_cancels() {
    let store = records_store();
    let mut app = make_app(&store, 10);
    press(&mut app, &store, chr('p'));
    type_text(&mut app, &store, "  ");
    press(&mut app, &store, key(KeyCode::Enter));
    assert_eq!(app.mode, Mode::Browsing);
    assert_eq!(status(&app), "Pattern delete canceled.");
}

#[test]
fn pattern_without_matches_warns() {
    let store = records_store();
    let mut app = make_app(&store, 10);
    press(&mut app, &store, chr('p'));
    type_text(&mut app, &store, "zzz*");
    press(&mut app, &store, key(KeyCode::Enter));
    press(&mut app, &store, chr('y'));
    assert_eq!(app.feedback.status.kind, StatusKind::Warn);
    assert_eq!(status(&app), "Warning: no matches for pattern: zzz*");
    assert_eq!(store.keys().len(), 3);
}

#[test]
fn partial_pattern_delete_reports_progress() {
    let store = records_store();
    store.fail_deletes_after(1);
    let mut app = make_app(&store, 10);
    press(&mut app, &store, chr('p'));
    type_text(&mut app, &store, "rec:*");
    press(&mut app, &store, key(KeyCode::Enter));
    press(&mut app, &store, chr('y'));
    assert!(status(&app).starts_with("Error: pattern delete failed after 1 records:"));
    assert_eq!(app.browser.keys(), ["rec:2", "user:1"]);
}

#[test]
fn pattern_prompt_returns_to_value_pane() {
    let store = records_store();
    let mut app = make_app(&store, 10);
    press(&mut app, &store, key(KeyCode::Enter));
    press(&mut app, &store, chr('p'));
    press(&mut app, &store, key(KeyCode::Esc));
    assert_eq!(app.mode, Mode::ValueFocused);
    assert_eq!(status(&app), "Pattern delete canceled.");
}

#[test]
fn pattern_delete_clears_deleted_value() {
    let store = records_store();
    let mut app = make_app(&store, 10);
    press(&mut app, &store, key(KeyCode::Enter));
    assert_eq!(app.value.key.as_deref(), Some("rec:1"));
    press(&mut app, &store, chr('p'));
    type_text(&mut app, &store, "rec:*");
    press(&mut app, &store, key(KeyCode::Enter));
    press(&mut app, &store, key(KeyCode::Enter));
    assert!(app.value.key.is_none());
    assert_eq!(app.mode, Mode::Browsing);
}

// ─────────────────────────────────────────────────────────────────────────────
// Group counts
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn group_overlay_loads_counts() {
    let store = MemoryStore::from_pairs([("a:1", "x"), ("a:2", "x"), ("b:1", "x"), ("plain", "x")]);
    let mut app = make_app(&store, 2);
    press(&mut app, &store, chr('g'));
    assert!(app.groups.visible);
    assert!(!app.groups.loading);
    let labels: Vec<(&str, usize)> = app
        .groups
        .counts
        .iter()
        .map(|g| (g.label.as_str(), g.count))
        .collect();
    assert_eq!(labels, vec![("a", 2), ("(no prefix)", 1), ("b", 1)]);
    assert!(!app.browser.has_more(), "group view sweeps the keyspace");

    press(&mut app, &store, chr('q'));
    assert!(app.running);
    press(&mut app, &store, chr('g'));
    assert!(!app.groups.visible);
}

#[test]
fn group_errors_are_kept() {
    let store = MemoryStore::from_pairs([("a:1", "x")]);
    let mut app = make_app(&store, 10);
    store.fail_list(true);
    press(&mut app, &store, chr('g'));
    assert!(app.groups.error.is_some());
}
