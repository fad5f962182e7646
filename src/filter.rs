//! Glob matching of object keys.

use glob::{MatchOptions, Pattern, PatternError};

/// Wildcards stay within one `/`-delimited segment; `**` spans segments.
const KEY_MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Compiled glob filter over object keys.
pub struct KeyFilter {
    pattern: Pattern,
}

impl KeyFilter {
    /// Compiles the glob pattern. Invalid patterns are rejected here, before
    /// any store request is made.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        Ok(Self {
            pattern: Pattern::new(pattern)?,
        })
    }

    /// True iff the key matches the pattern. Side-effect free; keys that do
    /// not match simply return false.
    pub fn matches(&self, key: &str) -> bool {
        self.pattern.matches_with(key, KEY_MATCH_OPTIONS)
    }

    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}
