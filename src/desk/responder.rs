//! The generative model behind assistant replies.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Instruction appended to the prompt when a session is being escalated.
pub const HANDOFF_INSTRUCTION: &str = "The user needs to be connected to a human agent. \
     Inform them politely that you're connecting them with a specialist.";

/// Everything a responder gets to produce one reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyRequest {
    pub query: String,
    /// Recent turns as a tagged transcript block.
    pub history: String,
    pub country: Option<String>,
    /// When set, the reply should tell the user a specialist is coming.
    pub needs_handoff: bool,
}

impl ReplyRequest {
    /// Prompt fragments in the order a hosted model expects them.
    pub fn prompt_parts(&self) -> Vec<String> {
        let mut parts = Vec::with_capacity(4);
        if let Some(country) = &self.country {
            parts.push(format!("The user is from {country}"));
        }
        if !self.history.is_empty() {
            parts.push(self.history.clone());
        }
        parts.push(format!("Query: {}", self.query));
        if self.needs_handoff {
            parts.push(HANDOFF_INSTRUCTION.to_string());
        }
        parts
    }
}

/// Produces assistant replies.
#[async_trait]
pub trait Responder: Send + Sync {
    async fn respond(&self, request: &ReplyRequest) -> Result<String>;
}

/// A responder returning fixed texts, for tests and offline tooling.
#[derive(Debug, Clone)]
pub struct CannedResponder {
    pub reply: String,
    pub handoff_reply: String,
}

impl Default for CannedResponder {
    fn default() -> Self {
        CannedResponder {
            reply: "Happy to help with that.".to_string(),
            handoff_reply: "Let me connect you with a specialist.".to_string(),
        }
    }
}

#[async_trait]
impl Responder for CannedResponder {
    async fn respond(&self, request: &ReplyRequest) -> Result<String> {
        Ok(if request.needs_handoff {
            self.handoff_reply.clone()
        } else {
            self.reply.clone()
        })
    }
}
