//! Stop filter implementation.
//!
//! Removes low-information words before messages are compared. The default
//! list is tuned for short support-chat utterances: besides articles and
//! prepositions it drops pronouns, auxiliaries, politeness words and the
//! apostrophe-stripped contractions produced by the analysis char filter
//! (`im`, `youre`, `dont`, ...). Negations such as `not` are kept because
//! they carry intent ("not helping").
//!
//! # Examples
//!
//! ```
//! use handoff::analysis::token_filter::Filter;
//! use handoff::analysis::token_filter::stop::StopFilter;
//! use handoff::analysis::token::Token;
//!
//! let filter = StopFilter::new();
//! let tokens = vec![
//!     Token::new("process", 0),
//!     Token::new("my", 1),
//!     Token::new("refund", 2)
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "process");
//! assert_eq!(result[1].text, "refund");
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Default stop words for English support-chat messages.
pub const DEFAULT_ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "all", "am", "an", "and", "any", "are", "as", "at", "be", "been", "but", "by",
    "can", "could", "did", "do", "does", "for", "from", "had", "has", "have", "he", "her", "here",
    "him", "his", "how", "i", "id", "if", "ill", "im", "in", "into", "is", "it", "its", "ive",
    "just", "let", "lets", "me", "my", "of", "on", "or", "our", "please", "pls", "she", "so",
    "some", "than", "that", "the", "their", "them", "then", "there", "these", "they", "this",
    "those", "to", "too", "us", "very", "was", "we", "were", "will", "with", "would", "you",
    "youd", "youll", "your", "youre", "yours",
];

/// Default English stop words as a HashSet.
pub static DEFAULT_ENGLISH_STOP_WORDS_SET: LazyLock<HashSet<String>> = LazyLock::new(|| {
    DEFAULT_ENGLISH_STOP_WORDS
        .iter()
        .map(|&s| s.to_string())
        .collect()
});

/// Removes (or marks) tokens whose text is in a stop word set.
///
/// Lookup is exact, so the set must already be in the form the preceding
/// filters produce (lowercase, no punctuation).
#[derive(Clone, Debug)]
pub struct StopFilter {
    stop_words: Arc<HashSet<String>>,
    /// When false, stop words stay in the stream marked as stopped.
    remove_stopped: bool,
}

impl StopFilter {
    /// A filter over [`DEFAULT_ENGLISH_STOP_WORDS`].
    pub fn new() -> Self {
        Self::with_stop_words(DEFAULT_ENGLISH_STOP_WORDS_SET.clone())
    }

    pub fn with_stop_words(stop_words: HashSet<String>) -> Self {
        StopFilter {
            stop_words: Arc::new(stop_words),
            remove_stopped: true,
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_stop_words(words.into_iter().map(Into::into).collect())
    }

    /// Keep stop words in the stream, marked as stopped, instead of dropping
    /// them.
    pub fn mark_only(mut self) -> Self {
        self.remove_stopped = false;
        self
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let stop_words = Arc::clone(&self.stop_words);
        let remove_stopped = self.remove_stopped;

        Ok(Box::new(tokens.filter_map(move |token| {
            if token.is_stopped() || !stop_words.contains(&token.text) {
                Some(token)
            } else if remove_stopped {
                None
            } else {
                Some(token.stop())
            }
        })))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::token::Token;

    fn run(filter: &StopFilter, words: &[&str]) -> Vec<Token> {
        let tokens: Vec<Token> = words
            .iter()
            .enumerate()
            .map(|(i, w)| Token::new(*w, i))
            .collect();
        filter.filter(Box::new(tokens.into_iter())).unwrap().collect()
    }

    #[test]
    fn test_stop_filter_removes() {
        let filter = StopFilter::from_words(["the", "and", "or"]);
        let result = run(&filter, &["cancel", "the", "plan", "and", "refund"]);

        let texts: Vec<&str> = result.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["cancel", "plan", "refund"]);
        assert_eq!(filter.len(), 3);
    }

    #[test]
    fn test_stop_filter_mark_only() {
        let filter = StopFilter::from_words(["the"]).mark_only();
        let result = run(&filter, &["the", "agent"]);

        assert_eq!(result.len(), 2);
        assert!(result[0].is_stopped());
        assert!(!result[1].is_stopped());
    }

    #[test]
    fn test_default_list_keeps_intent_words() {
        let filter = StopFilter::new();
        for word in ["the", "a", "is", "my", "im", "youre", "please"] {
            assert!(filter.is_stop_word(word), "{word} should be a stop word");
        }
        for word in ["not", "human", "agent", "refund", "cancel", "need"] {
            assert!(!filter.is_stop_word(word), "{word} should be kept");
        }
        assert!(StopFilter::from_words(Vec::<String>::new()).is_empty());
    }
}
