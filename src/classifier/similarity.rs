//! Set-overlap measures used to compare a message with a reference phrase.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Jaccard similarity |A ∩ B| / |A ∪ B|; 0.0 when both sets are empty.
pub fn jaccard(a: &HashSet<String>, b: &HashSet<String>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    a.intersection(b).count() as f64 / union as f64
}

/// Share of `query` tokens found in `phrase`, over the smaller set size.
///
/// 0.0 when either set is empty. Both sets are deduplicated, so the ratio
/// never exceeds 1.0.
pub fn exact_match_ratio(query: &HashSet<String>, phrase: &HashSet<String>) -> f64 {
    let smaller = query.len().min(phrase.len());
    if smaller == 0 {
        return 0.0;
    }
    let hits = query.iter().filter(|token| phrase.contains(*token)).count();
    hits as f64 / smaller as f64
}

/// Both overlap measures for one query/phrase pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhraseScore {
    pub jaccard: f64,
    pub exact_match: f64,
}

impl PhraseScore {
    /// Score `query` against `phrase`.
    pub fn compute(query: &HashSet<String>, phrase: &HashSet<String>) -> Self {
        PhraseScore {
            jaccard: jaccard(query, phrase),
            exact_match: exact_match_ratio(query, phrase),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_jaccard() {
        assert_eq!(jaccard(&set(&[]), &set(&[])), 0.0);
        assert_eq!(jaccard(&set(&["a"]), &set(&[])), 0.0);
        assert_eq!(jaccard(&set(&["a", "b"]), &set(&["a", "b"])), 1.0);
        assert_eq!(jaccard(&set(&["refund"]), &set(&["process", "refund"])), 0.5);
        assert!((jaccard(&set(&["a", "b"]), &set(&["b", "c"])) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_exact_match_ratio() {
        assert_eq!(exact_match_ratio(&set(&[]), &set(&["a"])), 0.0);
        assert_eq!(exact_match_ratio(&set(&["a"]), &set(&[])), 0.0);
        assert_eq!(
            exact_match_ratio(&set(&["refund"]), &set(&["process", "refund"])),
            1.0
        );
        assert_eq!(
            exact_match_ratio(&set(&["where", "refund", "now"]), &set(&["process", "refund"])),
            0.5
        );
    }

    #[test]
    fn test_phrase_score() {
        let q = set(&["cancel", "plan"]);
        let p = set(&["cancel", "subscription"]);
        let score = PhraseScore::compute(&q, &p);

        assert!((score.jaccard - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(score.exact_match, 0.5);
    }
}
