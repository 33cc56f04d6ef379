//! Static catalogs consulted by the handoff classifier.
//!
//! A [`HandoffCatalog`] is plain data: it is deserialized from configuration
//! or taken from the defaults below, handed to a classifier at construction
//! and never mutated afterwards.

use serde::{Deserialize, Serialize};

use crate::analysis::token_filter::stop::DEFAULT_ENGLISH_STOP_WORDS;

/// Reference phrases that signal a request for a human.
pub const DEFAULT_HANDOFF_PHRASES: &[&str] = &[
    "speak to a human",
    "talk to a person",
    "connect me with an agent",
    "live agent please",
    "need a real person",
    "transfer to manager",
    "get me a supervisor",
    "customer representative",
    "this is a complex issue",
    "you're not helping me",
    "I'm getting frustrated",
    "I have a complaint",
    "process my refund",
    "cancel my subscription",
];

/// Single tokens that trigger a handoff on their own.
pub const DEFAULT_HANDOFF_INDICATORS: &[&str] = &[
    "human",
    "agent",
    "representative",
    "manager",
    "supervisor",
    "refund",
    "cancel",
    "frustrated",
    "complaint",
];

/// Substrings of the raw message that signal explicit dissatisfaction.
pub const DEFAULT_FRUSTRATION_KEYWORDS: &[&str] = &[
    "not working",
    "doesn't work",
    "useless",
    "waste of time",
    "ridiculous",
];

/// The phrase, stop word, indicator and frustration catalogs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandoffCatalog {
    /// Reference phrases compared by token overlap.
    pub phrases: Vec<String>,
    /// Words dropped before comparison.
    pub stop_words: Vec<String>,
    /// Tokens that short-circuit to a handoff.
    pub indicators: Vec<String>,
    /// Case-insensitive substrings checked last.
    pub frustration_keywords: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl Default for HandoffCatalog {
    fn default() -> Self {
        Self {
            phrases: owned(DEFAULT_HANDOFF_PHRASES),
            stop_words: owned(DEFAULT_ENGLISH_STOP_WORDS),
            indicators: owned(DEFAULT_HANDOFF_INDICATORS),
            frustration_keywords: owned(DEFAULT_FRUSTRATION_KEYWORDS),
        }
    }
}

impl HandoffCatalog {
    /// A catalog with no entries at all.
    pub fn empty() -> Self {
        Self {
            phrases: Vec::new(),
            stop_words: Vec::new(),
            indicators: Vec::new(),
            frustration_keywords: Vec::new(),
        }
    }

    /// Replace the reference phrases.
    pub fn with_phrases<I, S>(mut self, phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the stop words.
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the indicator tokens.
    pub fn with_indicators<I, S>(mut self, indicators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.indicators = indicators.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the frustration keywords.
    pub fn with_frustration_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.frustration_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}
