//! The analyzer used to compare chat messages with handoff phrases.
//!
//! # Pipeline
//!
//! 1. PatternReplaceCharFilter (strip punctuation, digits and symbols)
//! 2. WhitespaceTokenizer
//! 3. LowercaseFilter (locale-invariant)
//! 4. StopFilter (marks stop words)
//! 5. RemoveEmptyFilter (drops stopped and empty tokens)

use std::collections::HashSet;
use std::sync::Arc;

use super::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_filter::CharFilter;
use crate::analysis::char_filter::pattern_replace::PatternReplaceCharFilter;
use crate::analysis::token::TokenStream;
use crate::analysis::token_filter::Filter;
use crate::analysis::token_filter::lowercase::LowercaseFilter;
use crate::analysis::token_filter::remove_empty::RemoveEmptyFilter;
use crate::analysis::token_filter::stop::{DEFAULT_ENGLISH_STOP_WORDS_SET, StopFilter};
use crate::analysis::tokenizer::whitespace::WhitespaceTokenizer;
use crate::error::Result;

/// Analyzer producing the token sets compared by the handoff classifier.
///
/// The stop filter only marks stop words; [`RemoveEmptyFilter`] drops them
/// together with emptied tokens in the last step. [`stopped_words`] reads the
/// marked stream before that step.
///
/// [`stopped_words`]: HandoffAnalyzer::stopped_words
pub struct HandoffAnalyzer {
    marking: PipelineAnalyzer,
    remove: RemoveEmptyFilter,
    strip: PatternReplaceCharFilter,
    stop_words: HashSet<String>,
}

impl HandoffAnalyzer {
    /// Create a handoff analyzer with the default stop words.
    pub fn new() -> Result<Self> {
        Self::build(DEFAULT_ENGLISH_STOP_WORDS_SET.clone())
    }

    /// Create a handoff analyzer with custom stop words.
    ///
    /// Stop words go through the same stripping and lowercasing as message
    /// text, so `"You're"` in a catalog matches the token `youre`.
    pub fn with_stop_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let strip = PatternReplaceCharFilter::strip_non_letters()?;
        let stop_words = words
            .into_iter()
            .map(|w| normalize_with(&strip, w.as_ref()))
            .filter(|w| !w.is_empty())
            .collect();

        Self::build(stop_words)
    }

    fn build(stop_words: HashSet<String>) -> Result<Self> {
        let strip = PatternReplaceCharFilter::strip_non_letters()?;
        let marking = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(strip.clone()))
            .add_filter(Arc::new(LowercaseFilter::new()))
            .add_filter(Arc::new(
                StopFilter::with_stop_words(stop_words.clone()).mark_only(),
            ))
            .with_name("handoff");

        Ok(HandoffAnalyzer {
            marking,
            remove: RemoveEmptyFilter::new(),
            strip,
            stop_words,
        })
    }

    /// Normalize a single catalog term the way message text is normalized,
    /// without stop word removal.
    pub fn normalize_term(&self, term: &str) -> String {
        normalize_with(&self.strip, term)
    }

    /// Whether a normalized term is one of this analyzer's stop words.
    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_words.contains(term)
    }

    /// Analyze `text` into a deduplicated token set.
    pub fn token_set(&self, text: &str) -> Result<HashSet<String>> {
        Ok(self.analyze(text)?.map(|token| token.text).collect())
    }

    /// Analyze `text` into distinct tokens in order of first occurrence.
    pub fn token_list(&self, text: &str) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        Ok(self
            .analyze(text)?
            .map(|token| token.text)
            .filter(|text| seen.insert(text.clone()))
            .collect())
    }

    /// Distinct stop words found in `text`, in order of first occurrence.
    pub fn stopped_words(&self, text: &str) -> Result<Vec<String>> {
        let mut seen = HashSet::new();
        Ok(self
            .marking
            .analyze(text)?
            .filter(|token| token.is_stopped())
            .map(|token| token.text)
            .filter(|text| seen.insert(text.clone()))
            .collect())
    }

    /// Number of distinct stop words in this analyzer.
    pub fn stop_word_count(&self) -> usize {
        self.stop_words.len()
    }
}

fn normalize_with(strip: &PatternReplaceCharFilter, term: &str) -> String {
    strip.filter(term).trim().to_lowercase()
}

impl Analyzer for HandoffAnalyzer {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.remove.filter(self.marking.analyze(text)?)
    }

    fn name(&self) -> &'static str {
        "handoff"
    }
}

impl std::fmt::Debug for HandoffAnalyzer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandoffAnalyzer")
            .field("pipeline", &self.marking)
            .field("stop_words", &self.stop_words.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(analyzer: &HandoffAnalyzer, text: &str) -> Vec<String> {
        analyzer.analyze(text).unwrap().map(|t| t.text).collect()
    }

    #[test]
    fn test_handoff_analyzer() {
        let analyzer = HandoffAnalyzer::new().unwrap();

        assert_eq!(words(&analyzer, "Process my refund"), vec!["process", "refund"]);
        assert_eq!(
            words(&analyzer, "You're NOT helping me!"),
            vec!["not", "helping"]
        );
        assert_eq!(words(&analyzer, "Order #42 is late."), vec!["order", "late"]);
    }

    #[test]
    fn test_only_stop_words_or_symbols() {
        let analyzer = HandoffAnalyzer::new().unwrap();

        assert!(words(&analyzer, "the a is").is_empty());
        assert!(words(&analyzer, "123 ?!? 456").is_empty());
        assert!(words(&analyzer, "").is_empty());
        assert!(words(&analyzer, "   \n ").is_empty());
    }

    #[test]
    fn test_token_set_deduplicates() {
        let analyzer = HandoffAnalyzer::new().unwrap();
        let set = analyzer.token_set("refund refund REFUND").unwrap();

        assert_eq!(set.len(), 1);
        assert!(set.contains("refund"));

        assert_eq!(
            analyzer.token_list("refund now, refund!").unwrap(),
            vec!["refund", "now"]
        );
    }

    #[test]
    fn test_custom_stop_words_are_normalized() {
        let analyzer = HandoffAnalyzer::with_stop_words(["You're", "THE", "!!"]).unwrap();

        assert_eq!(analyzer.stop_word_count(), 2);
        assert_eq!(words(&analyzer, "you're the best"), vec!["best"]);
    }

    #[test]
    fn test_stopped_words() {
        let analyzer = HandoffAnalyzer::new().unwrap();

        assert_eq!(
            analyzer.stopped_words("I'm sure THE agent is the best").unwrap(),
            vec!["im", "the", "is"]
        );
        assert!(analyzer.stopped_words("refund now").unwrap().is_empty());
        assert!(analyzer.is_stop_word("please"));
        assert!(!analyzer.is_stop_word("agent"));
    }

    #[test]
    fn test_normalize_term() {
        let analyzer = HandoffAnalyzer::new().unwrap();

        assert_eq!(analyzer.normalize_term("  Refund! "), "refund");
        assert_eq!(analyzer.normalize_term("the"), "the");
        assert_eq!(analyzer.normalize_term("42"), "");
    }

    #[test]
    fn test_analyzer_name() {
        assert_eq!(HandoffAnalyzer::new().unwrap().name(), "handoff");
    }
}
