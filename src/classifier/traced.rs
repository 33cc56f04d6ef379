//! Decision logging as a decorator around any policy.

use log::{Level, debug, log_enabled};

use crate::classifier::HandoffPolicy;
use crate::classifier::decision::HandoffDecision;

/// Wraps a [`HandoffPolicy`] and logs every decision at `debug` level.
///
/// Only lengths of the message and history are logged, never their text.
#[derive(Debug, Clone)]
pub struct TracedPolicy<P> {
    inner: P,
}

impl<P: HandoffPolicy> TracedPolicy<P> {
    /// Wrap `inner`.
    pub fn new(inner: P) -> Self {
        TracedPolicy { inner }
    }

    /// Get the wrapped policy.
    pub fn inner(&self) -> &P {
        &self.inner
    }

    /// Unwrap into the inner policy.
    pub fn into_inner(self) -> P {
        self.inner
    }
}

impl<P: HandoffPolicy> HandoffPolicy for TracedPolicy<P> {
    fn evaluate(&self, query: &str, history: &str) -> HandoffDecision {
        let decision = self.inner.evaluate(query, history);

        if log_enabled!(Level::Debug) {
            debug!(
                "policy={} query_len={} history_len={} -> {}",
                self.inner.name(),
                query.chars().count(),
                history.chars().count(),
                decision
            );
        }

        decision
    }

    fn name(&self) -> &'static str {
        self.inner.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::HandoffClassifier;

    #[test]
    fn test_traced_policy_is_transparent() {
        let plain = HandoffClassifier::new().unwrap();
        let traced = TracedPolicy::new(HandoffClassifier::new().unwrap());

        for query in [
            "speak to a human",
            "what is the price",
            "this is useless",
            "",
        ] {
            assert_eq!(traced.evaluate(query, ""), plain.evaluate(query, ""));
        }
        assert_eq!(traced.name(), "jaccard");
    }

    #[test]
    fn test_traced_policy_over_reference() {
        let classifier = HandoffClassifier::new().unwrap();
        let traced = TracedPolicy::new(&classifier);

        assert!(traced.should_handoff("live agent please", ""));
        assert_eq!(traced.inner().name(), "jaccard");
    }
}
