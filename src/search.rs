//! Fuzzy key matching and prefix grouping.

use std::collections::HashMap;

/// Character that separates a key's group prefix from the rest of the key.
pub const GROUP_DELIMITER: char = ':';
pub const NO_PREFIX_GROUP: &str = "(no prefix)";
pub const EMPTY_KEY_GROUP: &str = "(empty)";

/// Greedy, case-insensitive subsequence match.
///
/// Each pattern character is consumed by the first matching target character
/// at or after the previous match. There is no backtracking, so the scan is a
/// single pass over `target`.
pub fn fuzzy_match(pattern: &[char], target: &str) -> bool {
    let Some(mut want) = pattern.first().copied() else {
        return true;
    };
    let mut pi = 0;
    for c in target.chars() {
        if fold_eq(c, want) {
            pi += 1;
            match pattern.get(pi) {
                Some(&next) => want = next,
                None => return true,
            }
        }
    }
    false
}

/// Simple case folding: equal, or equal once both sides are lowercased or
/// uppercased one character at a time.
fn fold_eq(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(&b);
    }
    a.to_lowercase().eq(b.to_lowercase()) || a.to_uppercase().eq(b.to_uppercase())
}

/// Group label for a key: the text before the first delimiter.
pub fn group_label(key: &str) -> &str {
    if key.is_empty() {
        return EMPTY_KEY_GROUP;
    }
    match key.find(GROUP_DELIMITER) {
        Some(idx) if idx > 0 => &key[..idx],
        _ => NO_PREFIX_GROUP,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupCount {
    pub label: String,
    pub count: usize,
}

/// Sort by count descending, then label ascending.
pub fn sorted_group_counts(counts: HashMap<String, usize>) -> Vec<GroupCount> {
    let mut out: Vec<GroupCount> = counts
        .into_iter()
        .map(|(label, count)| GroupCount { label, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.label.cmp(&b.label)));
    out
}
