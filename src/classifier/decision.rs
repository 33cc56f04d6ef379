//! Classification outcome with the signal that produced it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What made the classifier hand a conversation off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HandoffReason {
    /// A message token is in the indicator catalog.
    Indicator { token: String },
    /// The message is close enough to a reference phrase.
    PhraseSimilarity {
        phrase: String,
        jaccard: f64,
        exact_match: f64,
    },
    /// The raw message contains a frustration keyword.
    FrustrationKeyword { keyword: String },
}

impl fmt::Display for HandoffReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandoffReason::Indicator { token } => write!(f, "indicator token '{token}'"),
            HandoffReason::PhraseSimilarity {
                phrase,
                jaccard,
                exact_match,
            } => write!(
                f,
                "similar to '{phrase}' (jaccard {jaccard:.3}, exact match {exact_match:.3})"
            ),
            HandoffReason::FrustrationKeyword { keyword } => {
                write!(f, "frustration keyword '{keyword}'")
            }
        }
    }
}

/// The result of classifying one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandoffDecision {
    pub handoff: bool,
    pub reason: Option<HandoffReason>,
}

impl HandoffDecision {
    /// Keep the conversation with the automated assistant.
    pub fn stay() -> Self {
        HandoffDecision {
            handoff: false,
            reason: None,
        }
    }

    /// Hand the conversation to a human for `reason`.
    pub fn escalate(reason: HandoffReason) -> Self {
        HandoffDecision {
            handoff: true,
            reason: Some(reason),
        }
    }
}

impl fmt::Display for HandoffDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) if self.handoff => write!(f, "handoff: {reason}"),
            _ if self.handoff => write!(f, "handoff"),
            _ => write!(f, "no handoff"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_display() {
        assert_eq!(HandoffDecision::stay().to_string(), "no handoff");

        let decision = HandoffDecision::escalate(HandoffReason::Indicator {
            token: "human".to_string(),
        });
        assert_eq!(decision.to_string(), "handoff: indicator token 'human'");
    }

    #[test]
    fn test_reason_serialization() {
        let reason = HandoffReason::PhraseSimilarity {
            phrase: "process my refund".to_string(),
            jaccard: 0.5,
            exact_match: 1.0,
        };
        let json = serde_json::to_value(&reason).unwrap();

        assert_eq!(json["kind"], "phrase_similarity");
        assert_eq!(json["phrase"], "process my refund");
        assert_eq!(json["jaccard"], 0.5);
    }
}
