//! Human-handoff classification.
//!
//! A [`HandoffPolicy`] decides, for each inbound chat message, whether the
//! conversation should leave the automated assistant and go to a human
//! agent. The shipped policy is [`HandoffClassifier`], a token-overlap
//! (Jaccard) heuristic over a fixed catalog of reference phrases:
//!
//! ```text
//! query → token set ─┬─ empty?                → stay with assistant
//!                    ├─ indicator token?      → hand off
//!                    ├─ close to a phrase?    → hand off
//!                    └─ frustration keyword?  → hand off
//! ```
//!
//! Policies are pure: they hold only read-only catalogs built at
//! construction, never log, and can be shared across threads. Wrap a policy
//! in [`TracedPolicy`] to get decision logging.
//!
//! # Examples
//!
//! ```
//! use handoff::classifier::{HandoffClassifier, HandoffPolicy};
//!
//! let classifier = HandoffClassifier::new().unwrap();
//!
//! assert!(classifier.should_handoff("I need to speak to a human please", ""));
//! assert!(!classifier.should_handoff("What are your business hours?", ""));
//! ```

use std::sync::Arc;

pub mod catalog;
pub mod config;
pub mod decision;
pub mod jaccard;
pub mod similarity;
pub mod traced;

pub use catalog::HandoffCatalog;
pub use config::{HandoffConfig, Thresholds};
pub use decision::{HandoffDecision, HandoffReason};
pub use jaccard::HandoffClassifier;
pub use similarity::PhraseScore;
pub use traced::TracedPolicy;

/// Decides whether a conversation must be escalated to a human agent.
///
/// `history` is the pre-joined `"User: ...\nBot: ..."` block of recent
/// turns (see [`crate::history::History::format`]). Implementations must be
/// total over all strings and deterministic for equal inputs.
pub trait HandoffPolicy: Send + Sync {
    /// Classify a message and report what triggered the decision.
    fn evaluate(&self, query: &str, history: &str) -> HandoffDecision;

    /// Get the name of this policy (for logging and configuration).
    fn name(&self) -> &'static str;

    /// Whether the conversation should be handed to a human.
    fn should_handoff(&self, query: &str, history: &str) -> bool {
        self.evaluate(query, history).handoff
    }

    /// Like [`should_handoff`](Self::should_handoff), treating absent
    /// values as empty strings.
    fn should_handoff_opt(&self, query: Option<&str>, history: Option<&str>) -> bool {
        self.should_handoff(query.unwrap_or_default(), history.unwrap_or_default())
    }
}

impl<P: HandoffPolicy + ?Sized> HandoffPolicy for Arc<P> {
    fn evaluate(&self, query: &str, history: &str) -> HandoffDecision {
        (**self).evaluate(query, history)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

impl<P: HandoffPolicy + ?Sized> HandoffPolicy for &P {
    fn evaluate(&self, query: &str, history: &str) -> HandoffDecision {
        (**self).evaluate(query, history)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}
