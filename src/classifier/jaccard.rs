//! Token-overlap (Jaccard) handoff classifier.
//!
//! Decision order for a message:
//!
//! 1. Analyze into a token set (strip punctuation and digits, lowercase,
//!    drop stop words). An empty set never hands off.
//! 2. Any token in the indicator catalog hands off.
//! 3. Any reference phrase whose token set clears the [`Thresholds`] hands
//!    off.
//! 4. Any frustration keyword contained in the lowercased raw message hands
//!    off.
//!
//! Catalog entries are checked in catalog order, so the reported reason is
//! stable across calls and processes.

use std::collections::HashSet;

use crate::analysis::analyzer::HandoffAnalyzer;
use crate::classifier::HandoffPolicy;
use crate::classifier::catalog::HandoffCatalog;
use crate::classifier::config::{HandoffConfig, Thresholds};
use crate::classifier::decision::{HandoffDecision, HandoffReason};
use crate::classifier::similarity::PhraseScore;
use crate::error::Result;

/// A reference phrase with its analyzed token set.
#[derive(Debug, Clone)]
struct ReferencePhrase {
    text: String,
    tokens: HashSet<String>,
}

/// Jaccard-based classifier over an immutable catalog.
#[derive(Debug)]
pub struct HandoffClassifier {
    analyzer: HandoffAnalyzer,
    phrases: Vec<ReferencePhrase>,
    indicators: Vec<String>,
    frustration_keywords: Vec<String>,
    thresholds: Thresholds,
}

impl HandoffClassifier {
    /// Create a classifier with the default catalog and thresholds.
    pub fn new() -> Result<Self> {
        Self::with_config(&HandoffConfig::default())
    }

    /// Create a classifier from a configuration.
    ///
    /// The configuration is validated, and every phrase, indicator and
    /// keyword is normalized once here; nothing is re-derived per call.
    pub fn with_config(config: &HandoffConfig) -> Result<Self> {
        config.validate()?;
        Self::build(&config.catalog, config.thresholds)
    }

    fn build(catalog: &HandoffCatalog, thresholds: Thresholds) -> Result<Self> {
        let analyzer = HandoffAnalyzer::with_stop_words(&catalog.stop_words)?;

        let phrases = catalog
            .phrases
            .iter()
            .map(|phrase| {
                Ok(ReferencePhrase {
                    text: phrase.clone(),
                    tokens: analyzer.token_set(phrase)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut indicators: Vec<String> = Vec::with_capacity(catalog.indicators.len());
        for indicator in &catalog.indicators {
            let term = analyzer.normalize_term(indicator);
            if !term.is_empty() && !indicators.contains(&term) {
                indicators.push(term);
            }
        }

        let frustration_keywords = catalog
            .frustration_keywords
            .iter()
            .map(|k| k.to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        Ok(HandoffClassifier {
            analyzer,
            phrases,
            indicators,
            frustration_keywords,
            thresholds,
        })
    }

    /// The thresholds in use.
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// The analyzer used for messages and phrases.
    pub fn analyzer(&self) -> &HandoffAnalyzer {
        &self.analyzer
    }

    /// Analyze a message into its token set.
    ///
    /// Analysis cannot fail for the built-in pipeline, whose char filter
    /// regex is compiled and checked in `build`. Should it ever fail, the
    /// message is treated as carrying no tokens and stays with the assistant.
    pub fn tokens(&self, text: &str) -> HashSet<String> {
        self.analyzer.token_set(text).unwrap_or_default()
    }

    /// Score `query` against every reference phrase, in catalog order.
    pub fn phrase_scores(&self, query: &str) -> Vec<(String, PhraseScore)> {
        let query_tokens = self.tokens(query);
        self.phrases
            .iter()
            .map(|phrase| {
                (
                    phrase.text.clone(),
                    PhraseScore::compute(&query_tokens, &phrase.tokens),
                )
            })
            .collect()
    }

    fn indicator_hit(&self, tokens: &HashSet<String>) -> Option<HandoffReason> {
        self.indicators
            .iter()
            .find(|indicator| tokens.contains(*indicator))
            .map(|token| HandoffReason::Indicator {
                token: token.clone(),
            })
    }

    fn phrase_hit(&self, tokens: &HashSet<String>) -> Option<HandoffReason> {
        self.phrases.iter().find_map(|phrase| {
            let score = PhraseScore::compute(tokens, &phrase.tokens);
            self.thresholds
                .matches(&score)
                .then(|| HandoffReason::PhraseSimilarity {
                    phrase: phrase.text.clone(),
                    jaccard: score.jaccard,
                    exact_match: score.exact_match,
                })
        })
    }

    fn frustration_hit(&self, query: &str) -> Option<HandoffReason> {
        let lowered = query.to_lowercase();
        self.frustration_keywords
            .iter()
            .find(|keyword| lowered.contains(keyword.as_str()))
            .map(|keyword| HandoffReason::FrustrationKeyword {
                keyword: keyword.clone(),
            })
    }
}

impl HandoffPolicy for HandoffClassifier {
    /// Classify `query`. Prior turns are not consulted by this policy;
    /// `history` is accepted for contract compatibility.
    fn evaluate(&self, query: &str, _history: &str) -> HandoffDecision {
        let tokens = self.tokens(query);
        if tokens.is_empty() {
            return HandoffDecision::stay();
        }

        self.indicator_hit(&tokens)
            .or_else(|| self.phrase_hit(&tokens))
            .or_else(|| self.frustration_hit(query))
            .map(HandoffDecision::escalate)
            .unwrap_or_else(HandoffDecision::stay)
    }

    fn name(&self) -> &'static str {
        "jaccard"
    }
}
