use regex::Regex;

use super::CharFilter;
use crate::error::{HandoffError, Result};

/// Every char that is not a letter, a combining mark or whitespace.
///
/// Removing these strips punctuation and digits while keeping words of any
/// script intact; apostrophes vanish so `you're` becomes `youre`.
pub const NON_LETTER_PATTERN: &str = r"[^\p{L}\p{M}\s]";

/// A char filter that replaces characters matching a regex pattern.
#[derive(Clone, Debug)]
pub struct PatternReplaceCharFilter {
    pattern: Regex,
    replacement: String,
}

impl PatternReplaceCharFilter {
    /// Create a new pattern replace char filter.
    pub fn new(pattern: &str, replacement: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)
                .map_err(|e| HandoffError::analysis(format!("Invalid regex pattern: {e}")))?,
            replacement: replacement.to_string(),
        })
    }

    /// Create a filter that deletes punctuation, digits and symbols.
    pub fn strip_non_letters() -> Result<Self> {
        Self::new(NON_LETTER_PATTERN, "")
    }
}

impl CharFilter for PatternReplaceCharFilter {
    fn filter(&self, input: &str) -> String {
        self.pattern
            .replace_all(input, self.replacement.as_str())
            .into_owned()
    }

    fn name(&self) -> &'static str {
        "pattern_replace"
    }
}
