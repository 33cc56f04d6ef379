//! # Handoff
//!
//! Decides when a customer-support chat should leave the automated assistant
//! and go to a human agent, and routes the conversation accordingly.
//!
//! ## Features
//!
//! - Token-overlap handoff classifier over configurable catalogs
//! - Small text analysis pipeline (char filters, tokenizer, token filters)
//! - Tagged conversation history parsing and formatting
//! - Support desk routing with pluggable store, relay and responder
//! - JSON configuration with validation

pub mod analysis;
pub mod classifier;
pub mod cli;
pub mod desk;
pub mod error;
pub mod history;

pub mod prelude {
    pub use crate::classifier::{
        HandoffClassifier, HandoffConfig, HandoffDecision, HandoffPolicy, HandoffReason,
        TracedPolicy,
    };
    pub use crate::desk::{
        ChatReply, EventRelay, InboundMessage, MemoryMessageStore, MemoryRelay, MessageStore,
        Responder, SupportDesk,
    };
    pub use crate::error::{HandoffError, Result};
    pub use crate::history::{History, Turn};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
