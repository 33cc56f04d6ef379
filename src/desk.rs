//! Support desk: the conversation pipeline around the handoff classifier.
//!
//! The desk routes every inbound chat message either to the automated
//! assistant or to the human-agent dashboard, and implements the agent-side
//! operations (accept, ignore, end, reply). Persistence, the pub/sub relay
//! and the hosted model are collaborators behind traits:
//!
//! - [`MessageStore`] - transcript records
//! - [`EventRelay`] - real-time events to the chat widget and the dashboard
//! - [`Responder`] - the generative model producing assistant replies
//!
//! In-memory implementations of the store and relay are provided for tests
//! and local tooling.

pub mod record;
pub mod relay;
pub mod responder;
pub mod store;
pub mod support;

pub use record::{ChatRecord, ChatStatus, Role, SessionSummary, TranscriptEntry};
pub use relay::{
    AGENT_DASHBOARD_CHANNEL, EventRelay, MemoryRelay, Publication, RelayEvent, session_channel,
};
pub use responder::{CannedResponder, HANDOFF_INSTRUCTION, ReplyRequest, Responder};
pub use store::{MemoryMessageStore, MessageStore};
pub use support::{ChatReply, DeskConfig, InboundMessage, SupportDesk};
