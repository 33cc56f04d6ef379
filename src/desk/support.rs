//! The support desk: user-side routing and agent-side session operations.

use std::sync::Arc;

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::classifier::HandoffPolicy;
use crate::desk::record::{ChatRecord, ChatStatus, Role, SessionSummary, TranscriptEntry};
use crate::desk::relay::{AGENT_DASHBOARD_CHANNEL, EventRelay, RelayEvent, session_channel};
use crate::desk::responder::{ReplyRequest, Responder};
use crate::desk::store::MessageStore;
use crate::error::{HandoffError, Result};
use crate::history::{History, Turn};

const IGNORED_SYSTEM_MESSAGE: &str =
    "All agents are currently busy. Please try again later or continue working with the AI assistant.";
const IGNORED_AI_MESSAGE: &str = "I'm still here to help you. What can I assist you with?";

/// Desk settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// How many stored records of a session feed the history.
    pub history_window: usize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        DeskConfig { history_window: 5 }
    }
}

/// A message typed by the user in the chat widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InboundMessage {
    pub session_id: String,
    pub query: String,
    /// The user pressed the "talk to an agent" control.
    #[serde(default)]
    pub agent_requested: bool,
    #[serde(default)]
    pub country: Option<String>,
}

impl InboundMessage {
    pub fn new<S: Into<String>, Q: Into<String>>(session_id: S, query: Q) -> Self {
        InboundMessage {
            session_id: session_id.into(),
            query: query.into(),
            agent_requested: false,
            country: None,
        }
    }

    pub fn agent_requested(mut self) -> Self {
        self.agent_requested = true;
        self
    }

    pub fn with_country<S: Into<String>>(mut self, country: S) -> Self {
        self.country = Some(country.into());
        self
    }
}

/// What the widget receives for an inbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    /// The assistant reply; `None` when the user asked for an agent directly.
    pub response: Option<String>,
    pub needs_handoff: bool,
}

/// Routes conversations between the assistant and human agents.
///
/// Collaborators are shared through `Arc` so callers can keep handles to
/// them. The policy is owned; it is only ever read.
pub struct SupportDesk<S, R, M, P> {
    store: Arc<S>,
    relay: Arc<R>,
    responder: Arc<M>,
    policy: P,
    config: DeskConfig,
}

impl<S, R, M, P> SupportDesk<S, R, M, P>
where
    S: MessageStore,
    R: EventRelay,
    M: Responder,
    P: HandoffPolicy,
{
    /// Create a desk with the default configuration.
    pub fn new(store: Arc<S>, relay: Arc<R>, responder: Arc<M>, policy: P) -> Self {
        Self::with_config(store, relay, responder, policy, DeskConfig::default())
    }

    pub fn with_config(
        store: Arc<S>,
        relay: Arc<R>,
        responder: Arc<M>,
        policy: P,
        config: DeskConfig,
    ) -> Self {
        SupportDesk {
            store,
            relay,
            responder,
            policy,
            config,
        }
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn relay(&self) -> &Arc<R> {
        &self.relay
    }

    /// Handle a message typed by the user while the assistant owns the chat.
    ///
    /// When the user explicitly asked for an agent, nothing is generated and
    /// the caller is expected to follow up with [`Self::request_handoff`].
    pub async fn handle_user_message(&self, inbound: InboundMessage) -> Result<ChatReply> {
        require_non_empty("session id", &inbound.session_id)?;
        let session_id = inbound.session_id.as_str();
        let channel = session_channel(session_id);

        self.relay
            .publish(&channel, RelayEvent::new_message(Role::User, &inbound.query))
            .await?;

        if inbound.agent_requested {
            debug!("session={session_id} agent requested by user");
            return Ok(ChatReply {
                response: None,
                needs_handoff: true,
            });
        }

        let records = self
            .store
            .recent(session_id, self.config.history_window)
            .await?;
        let history = history_from_records(&records).format();

        let decision = self.policy.evaluate(&inbound.query, &history);
        debug!(
            "session={session_id} history_records={} {decision}",
            records.len()
        );

        let request = ReplyRequest {
            query: inbound.query.clone(),
            history,
            country: inbound.country.clone(),
            needs_handoff: decision.handoff,
        };
        let reply = self.responder.respond(&request).await?;

        let status = if decision.handoff {
            ChatStatus::NeedsHandoff
        } else {
            ChatStatus::Completed
        };
        self.store
            .append(ChatRecord::exchange(session_id, &inbound.query, &reply, status))
            .await?;

        self.relay
            .publish(&channel, RelayEvent::new_message(Role::Assistant, &reply))
            .await?;

        if decision.handoff {
            info!("session={session_id} escalated to agent dashboard");
            self.relay
                .publish(
                    AGENT_DASHBOARD_CHANNEL,
                    RelayEvent::HandoffNeeded {
                        session_id: session_id.to_string(),
                        user_query: Some(inbound.query.clone()),
                        is_explicit_request: false,
                        timestamp: Utc::now(),
                    },
                )
                .await?;
        }

        Ok(ChatReply {
            response: Some(reply),
            needs_handoff: decision.handoff,
        })
    }

    /// Forward a user message to the agent owning the session.
    pub async fn relay_to_agent(&self, session_id: &str, message: &str) -> Result<()> {
        require_non_empty("session id", session_id)?;

        self.store
            .append(ChatRecord::from_user(
                session_id,
                message,
                ChatStatus::AgentHandling,
            ))
            .await?;
        self.relay
            .publish(
                AGENT_DASHBOARD_CHANNEL,
                RelayEvent::UserMessage {
                    session_id: session_id.to_string(),
                    message: message.to_string(),
                    timestamp: Utc::now(),
                },
            )
            .await
    }

    /// Put a session in the agent queue at the user's request.
    pub async fn request_handoff(&self, session_id: &str) -> Result<()> {
        require_non_empty("session id", session_id)?;

        let updated = self
            .store
            .set_status(session_id, ChatStatus::PendingAgent)
            .await?;
        info!("session={session_id} handoff requested ({updated} records pending)");

        self.relay
            .publish(
                AGENT_DASHBOARD_CHANNEL,
                RelayEvent::HandoffNeeded {
                    session_id: session_id.to_string(),
                    user_query: None,
                    is_explicit_request: true,
                    timestamp: Utc::now(),
                },
            )
            .await
    }

    /// Assign a waiting session to `agent_name`.
    pub async fn accept_session(&self, session_id: &str, agent_name: &str) -> Result<()> {
        require_non_empty("session id", session_id)?;
        require_non_empty("agent name", agent_name)?;
        let channel = session_channel(session_id);

        self.store
            .set_status(session_id, ChatStatus::AgentHandling)
            .await?;
        self.store
            .append(ChatRecord::reply(
                session_id,
                format!("{agent_name} has joined the conversation and will assist you."),
                ChatStatus::AgentHandling,
            ))
            .await?;

        let greeting =
            format!("Hello! I'm {agent_name} and I'll be helping you today. How can I assist you?");

        self.relay
            .publish(
                &channel,
                RelayEvent::HandoffCompleted {
                    agent_name: agent_name.to_string(),
                    timestamp: Utc::now(),
                },
            )
            .await?;
        self.relay
            .publish(
                &channel,
                RelayEvent::AgentMessage {
                    agent_name: agent_name.to_string(),
                    message: greeting.clone(),
                    timestamp: Utc::now(),
                },
            )
            .await?;
        self.relay
            .publish(&channel, RelayEvent::new_message(Role::Agent, greeting))
            .await?;
        self.relay
            .publish(
                AGENT_DASHBOARD_CHANNEL,
                RelayEvent::SessionClaimed {
                    session_id: session_id.to_string(),
                    agent_name: agent_name.to_string(),
                    timestamp: Utc::now(),
                },
            )
            .await?;

        info!("session={session_id} claimed by {agent_name}");
        Ok(())
    }

    /// Decline a waiting session and hand it back to the assistant.
    pub async fn ignore_session(&self, session_id: &str) -> Result<()> {
        require_non_empty("session id", session_id)?;
        let channel = session_channel(session_id);

        self.store
            .set_status(session_id, ChatStatus::Completed)
            .await?;
        self.store
            .append(ChatRecord::reply(
                session_id,
                IGNORED_SYSTEM_MESSAGE,
                ChatStatus::SystemMessage,
            ))
            .await?;
        self.store
            .append(ChatRecord::reply(
                session_id,
                IGNORED_AI_MESSAGE,
                ChatStatus::Completed,
            ))
            .await?;

        self.relay
            .publish(
                &channel,
                RelayEvent::AgentIgnored {
                    system_message: IGNORED_SYSTEM_MESSAGE.to_string(),
                    ai_message: IGNORED_AI_MESSAGE.to_string(),
                    timestamp: Utc::now(),
                },
            )
            .await?;
        self.relay
            .publish(
                &channel,
                RelayEvent::new_message(Role::System, IGNORED_SYSTEM_MESSAGE),
            )
            .await?;
        self.relay
            .publish(
                &channel,
                RelayEvent::HandoffCancelled {
                    timestamp: Utc::now(),
                },
            )
            .await?;
        self.relay
            .publish(
                AGENT_DASHBOARD_CHANNEL,
                RelayEvent::SessionIgnored {
                    session_id: session_id.to_string(),
                    timestamp: Utc::now(),
                },
            )
            .await?;

        info!("session={session_id} returned to the assistant");
        Ok(())
    }

    /// Close a session owned by `agent_name`.
    pub async fn end_session(&self, session_id: &str, agent_name: &str) -> Result<()> {
        require_non_empty("session id", session_id)?;
        require_non_empty("agent name", agent_name)?;
        let channel = session_channel(session_id);
        let farewell = format!(
            "{agent_name} has ended the conversation. Thank you for using our support service."
        );

        self.store.set_status(session_id, ChatStatus::Closed).await?;
        self.store
            .append(ChatRecord::reply(session_id, &farewell, ChatStatus::Closed))
            .await?;

        self.relay
            .publish(&channel, RelayEvent::new_message(Role::System, farewell))
            .await?;
        self.relay
            .publish(
                &channel,
                RelayEvent::SessionEnded {
                    agent_name: agent_name.to_string(),
                    timestamp: Utc::now(),
                },
            )
            .await?;
        self.relay
            .publish(
                AGENT_DASHBOARD_CHANNEL,
                RelayEvent::SessionClosed {
                    session_id: session_id.to_string(),
                    agent_name: agent_name.to_string(),
                    timestamp: Utc::now(),
                },
            )
            .await?;

        info!("session={session_id} closed by {agent_name}");
        Ok(())
    }

    /// Send an agent's reply to the user.
    pub async fn send_agent_message(
        &self,
        session_id: &str,
        agent_name: &str,
        message: &str,
    ) -> Result<()> {
        require_non_empty("session id", session_id)?;
        require_non_empty("agent name", agent_name)?;

        self.store
            .append(ChatRecord::reply(
                session_id,
                message,
                ChatStatus::AgentHandling,
            ))
            .await?;
        self.relay
            .publish(
                &session_channel(session_id),
                RelayEvent::AgentMessage {
                    agent_name: agent_name.to_string(),
                    message: message.to_string(),
                    timestamp: Utc::now(),
                },
            )
            .await
    }

    /// Sessions waiting for an agent, most recently active first.
    pub async fn pending_sessions(&self) -> Result<Vec<SessionSummary>> {
        self.store.sessions_with_status(&ChatStatus::PENDING).await
    }

    /// The transcript of a session as shown on the dashboard.
    pub async fn session_messages(&self, session_id: &str) -> Result<Vec<TranscriptEntry>> {
        require_non_empty("session id", session_id)?;

        let records = self.store.session(session_id).await?;
        Ok(records.iter().flat_map(TranscriptEntry::from_record).collect())
    }
}

/// Build the history fed to the policy and responder from stored records.
fn history_from_records(records: &[ChatRecord]) -> History {
    let mut history = History::new();
    for record in records {
        if let Some(message) = &record.user_message {
            history.push(Turn::user(message.as_str()));
        }
        if let Some(response) = &record.bot_response {
            history.push(Turn::bot(response.as_str()));
        }
    }
    history
}

fn require_non_empty(what: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(HandoffError::invalid_argument(format!(
            "{what} must not be empty"
        )));
    }
    Ok(())
}
