//! Real-time event relay between the chat widget and the agent dashboard.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::desk::record::Role;
use crate::error::Result;

/// Channel every agent dashboard listens on.
pub const AGENT_DASHBOARD_CHANNEL: &str = "agent-dashboard";

/// Channel of a single chat session.
pub fn session_channel(session_id: &str) -> String {
    format!("chat-{session_id}")
}

/// Events published on relay channels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum RelayEvent {
    /// A line to append to the chat widget.
    NewMessage {
        role: Role,
        content: String,
        timestamp: DateTime<Utc>,
    },
    /// A session needs an agent.
    HandoffNeeded {
        session_id: String,
        user_query: Option<String>,
        is_explicit_request: bool,
        timestamp: DateTime<Utc>,
    },
    /// A user wrote while an agent owns the session.
    UserMessage {
        session_id: String,
        message: String,
        timestamp: DateTime<Utc>,
    },
    HandoffCompleted {
        agent_name: String,
        timestamp: DateTime<Utc>,
    },
    AgentMessage {
        agent_name: String,
        message: String,
        timestamp: DateTime<Utc>,
    },
    SessionClaimed {
        session_id: String,
        agent_name: String,
        timestamp: DateTime<Utc>,
    },
    AgentIgnored {
        system_message: String,
        ai_message: String,
        timestamp: DateTime<Utc>,
    },
    HandoffCancelled {
        timestamp: DateTime<Utc>,
    },
    SessionIgnored {
        session_id: String,
        timestamp: DateTime<Utc>,
    },
    SessionEnded {
        agent_name: String,
        timestamp: DateTime<Utc>,
    },
    SessionClosed {
        session_id: String,
        agent_name: String,
        timestamp: DateTime<Utc>,
    },
}

impl RelayEvent {
    /// Shorthand for a [`RelayEvent::NewMessage`] stamped now.
    pub fn new_message<S: Into<String>>(role: Role, content: S) -> Self {
        RelayEvent::NewMessage {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            RelayEvent::NewMessage { .. } => "new-message",
            RelayEvent::HandoffNeeded { .. } => "handoff-needed",
            RelayEvent::UserMessage { .. } => "user-message",
            RelayEvent::HandoffCompleted { .. } => "handoff-completed",
            RelayEvent::AgentMessage { .. } => "agent-message",
            RelayEvent::SessionClaimed { .. } => "session-claimed",
            RelayEvent::AgentIgnored { .. } => "agent-ignored",
            RelayEvent::HandoffCancelled { .. } => "handoff-cancelled",
            RelayEvent::SessionIgnored { .. } => "session-ignored",
            RelayEvent::SessionEnded { .. } => "session-ended",
            RelayEvent::SessionClosed { .. } => "session-closed",
        }
    }
}

/// An event together with the channel it was published on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Publication {
    pub channel: String,
    pub event: RelayEvent,
}

/// Publishes events to named channels.
#[async_trait]
pub trait EventRelay: Send + Sync {
    async fn publish(&self, channel: &str, event: RelayEvent) -> Result<()>;
}

/// In-process relay backed by a broadcast channel.
///
/// Every publication is also kept in order so callers can inspect what was
/// sent without holding a subscription.
#[derive(Debug)]
pub struct MemoryRelay {
    sender: broadcast::Sender<Publication>,
    log: Mutex<Vec<Publication>>,
}

impl MemoryRelay {
    /// Create a relay whose subscribers buffer up to `capacity` events.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        MemoryRelay {
            sender,
            log: Mutex::new(Vec::new()),
        }
    }

    /// Receive every publication made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<Publication> {
        self.sender.subscribe()
    }

    /// All publications so far, oldest first.
    pub fn published(&self) -> Vec<Publication> {
        self.log.lock().clone()
    }

    /// Publications on one channel, oldest first.
    pub fn published_on(&self, channel: &str) -> Vec<RelayEvent> {
        self.log
            .lock()
            .iter()
            .filter(|p| p.channel == channel)
            .map(|p| p.event.clone())
            .collect()
    }

    /// Forget recorded publications.
    pub fn clear(&self) {
        self.log.lock().clear();
    }
}

impl Default for MemoryRelay {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl EventRelay for MemoryRelay {
    async fn publish(&self, channel: &str, event: RelayEvent) -> Result<()> {
        let publication = Publication {
            channel: channel.to_string(),
            event,
        };
        self.log.lock().push(publication.clone());
        // No subscribers is not an error.
        let _ = self.sender.send(publication);
        Ok(())
    }
}
