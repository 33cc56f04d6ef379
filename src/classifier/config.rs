//! Configuration for the handoff classifier.
//!
//! Thresholds are tuning constants, not derived from labelled transcripts;
//! they are kept here, apart from the matching code, so they can be
//! recalibrated and tested on their own.
//!
//! ```json
//! {
//!   "thresholds": { "jaccard_with_exact": 0.4, "exact_match": 0.5, "jaccard_alone": 0.6 },
//!   "catalog": { "indicators": ["human", "agent"] }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::analyzer::HandoffAnalyzer;
use crate::classifier::catalog::HandoffCatalog;
use crate::classifier::similarity::PhraseScore;
use crate::error::{HandoffError, Result};

/// Jaccard needed when the exact-match ratio also clears its threshold.
pub const DEFAULT_JACCARD_WITH_EXACT: f64 = 0.4;
/// Exact-match ratio paired with [`DEFAULT_JACCARD_WITH_EXACT`].
pub const DEFAULT_EXACT_MATCH: f64 = 0.5;
/// Jaccard that matches regardless of the exact-match ratio.
pub const DEFAULT_JACCARD_ALONE: f64 = 0.6;

/// Similarity thresholds for matching a message against a phrase.
///
/// A phrase matches when `(jaccard >= jaccard_with_exact && exact_match >=
/// exact_match) || jaccard >= jaccard_alone`. Values equal to a threshold
/// count as a match.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub jaccard_with_exact: f64,
    pub exact_match: f64,
    pub jaccard_alone: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            jaccard_with_exact: DEFAULT_JACCARD_WITH_EXACT,
            exact_match: DEFAULT_EXACT_MATCH,
            jaccard_alone: DEFAULT_JACCARD_ALONE,
        }
    }
}

impl Thresholds {
    /// Whether `score` clears these thresholds.
    pub fn matches(&self, score: &PhraseScore) -> bool {
        (score.jaccard >= self.jaccard_with_exact && score.exact_match >= self.exact_match)
            || score.jaccard >= self.jaccard_alone
    }

    /// Reject non-finite values and values outside `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("jaccard_with_exact", self.jaccard_with_exact),
            ("exact_match", self.exact_match),
            ("jaccard_alone", self.jaccard_alone),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(HandoffError::invalid_config(format!(
                    "threshold {name} must be within [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Complete classifier configuration: thresholds plus catalogs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandoffConfig {
    pub thresholds: Thresholds,
    pub catalog: HandoffCatalog,
}

impl HandoffConfig {
    /// Parse a JSON configuration; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check thresholds and catalog entries.
    pub fn validate(&self) -> Result<()> {
        self.thresholds.validate()?;

        if self.catalog.phrases.is_empty() {
            return Err(HandoffError::invalid_config(
                "catalog must contain at least one handoff phrase",
            ));
        }

        let lists = [
            ("phrases", &self.catalog.phrases),
            ("indicators", &self.catalog.indicators),
            ("frustration_keywords", &self.catalog.frustration_keywords),
            ("stop_words", &self.catalog.stop_words),
        ];
        for (name, entries) in lists {
            if let Some(pos) = entries.iter().position(|e| e.trim().is_empty()) {
                return Err(HandoffError::invalid_config(format!(
                    "catalog {name} entry {pos} is blank"
                )));
            }
        }

        self.validate_indicators()
    }

    /// Every indicator must survive analysis as exactly one token, since
    /// indicators are matched against single message tokens.
    fn validate_indicators(&self) -> Result<()> {
        let analyzer = HandoffAnalyzer::with_stop_words(&self.catalog.stop_words)?;

        for (pos, indicator) in self.catalog.indicators.iter().enumerate() {
            let term = analyzer.normalize_term(indicator);
            let problem = if term.is_empty() {
                "has no letters"
            } else if term.split_whitespace().nth(1).is_some() {
                "spans more than one word"
            } else if analyzer.is_stop_word(&term) {
                "is a stop word"
            } else {
                continue;
            };
            return Err(HandoffError::invalid_config(format!(
                "catalog indicators entry {pos} ({indicator:?}) {problem} and can never match"
            )));
        }

        Ok(())
    }
}
