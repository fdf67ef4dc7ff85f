//! Shell-style globs for bulk deletes.

use globset::{GlobBuilder, GlobMatcher};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("invalid pattern: {0}")]
pub struct PatternError(#[from] globset::Error);

/// A compiled delete pattern. `*` and `?` never cross a `/`, `[...]` is a
/// character class and `\` escapes the next character.
#[derive(Debug, Clone)]
pub struct KeyPattern {
    matcher: GlobMatcher,
}

impl KeyPattern {
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let glob = GlobBuilder::new(pattern)
            .literal_separator(true)
            .backslash_escape(true)
            .build()?;
        Ok(Self {
            matcher: glob.compile_matcher(),
        })
    }

    pub fn is_match(&self, key: &str) -> bool {
        self.matcher.is_match(key)
    }
}
