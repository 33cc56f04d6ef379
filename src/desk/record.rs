//! Transcript records and the views derived from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle state stored on each transcript record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatStatus {
    /// Answered by the assistant, no escalation.
    Completed,
    /// The classifier asked for a human.
    NeedsHandoff,
    /// The user explicitly asked for a human.
    PendingAgent,
    /// A human agent owns the session.
    AgentHandling,
    /// Notice generated by the desk itself.
    SystemMessage,
    /// Session ended by an agent.
    Closed,
}

impl ChatStatus {
    /// Statuses of sessions waiting for an agent.
    pub const PENDING: [ChatStatus; 2] = [ChatStatus::NeedsHandoff, ChatStatus::PendingAgent];
}

/// Who a transcript line is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    Agent,
    System,
}

/// One stored exchange or notice of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: Uuid,
    pub session_id: String,
    pub user_message: Option<String>,
    pub bot_response: Option<String>,
    pub status: ChatStatus,
    pub created_at: DateTime<Utc>,
}

impl ChatRecord {
    fn new(
        session_id: &str,
        user_message: Option<String>,
        bot_response: Option<String>,
        status: ChatStatus,
    ) -> Self {
        ChatRecord {
            id: Uuid::new_v4(),
            session_id: session_id.to_string(),
            user_message,
            bot_response,
            status,
            created_at: Utc::now(),
        }
    }

    /// A user message with the reply it received.
    pub fn exchange<Q, R>(session_id: &str, user_message: Q, bot_response: R, status: ChatStatus) -> Self
    where
        Q: Into<String>,
        R: Into<String>,
    {
        Self::new(
            session_id,
            Some(user_message.into()),
            Some(bot_response.into()),
            status,
        )
    }

    /// A user message without a reply.
    pub fn from_user<Q: Into<String>>(session_id: &str, user_message: Q, status: ChatStatus) -> Self {
        Self::new(session_id, Some(user_message.into()), None, status)
    }

    /// A reply-side message (agent, assistant or system notice).
    pub fn reply<R: Into<String>>(session_id: &str, bot_response: R, status: ChatStatus) -> Self {
        Self::new(session_id, None, Some(bot_response.into()), status)
    }

    /// Override the creation time.
    pub fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }
}

/// A session waiting for an agent, as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub session_id: String,
    pub last_activity: DateTime<Utc>,
    pub message_count: usize,
}

/// One line of a session transcript as shown to agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl TranscriptEntry {
    /// Render a stored record as zero, one or two transcript lines.
    ///
    /// The reply half of a user exchange always came from the assistant. A
    /// standalone reply is attributed to the agent when the session is in
    /// agent hands, otherwise to the assistant.
    pub fn from_record(record: &ChatRecord) -> Vec<Self> {
        let entry = |role, content: &String| TranscriptEntry {
            role,
            content: content.clone(),
            timestamp: record.created_at,
        };

        match (&record.user_message, &record.bot_response) {
            (Some(message), Some(response)) => {
                vec![entry(Role::User, message), entry(Role::Assistant, response)]
            }
            (Some(message), None) => vec![entry(Role::User, message)],
            (None, Some(response)) if record.status == ChatStatus::AgentHandling => {
                vec![entry(Role::Agent, response)]
            }
            (None, Some(response)) => vec![entry(Role::Assistant, response)],
            (None, None) => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ChatStatus::NeedsHandoff).unwrap(),
            "\"needs_handoff\""
        );
        assert_eq!(
            serde_json::to_string(&ChatStatus::AgentHandling).unwrap(),
            "\"agent_handling\""
        );
    }

    #[test]
    fn test_transcript_roles() {
        let user = ChatRecord::from_user("s1", "hi", ChatStatus::AgentHandling);
        let agent = ChatRecord::reply("s1", "hello, I'm Dana", ChatStatus::AgentHandling);
        let bot = ChatRecord::reply("s1", "how can I help?", ChatStatus::Completed);
        let empty = ChatRecord::new("s1", None, None, ChatStatus::Completed);

        assert_eq!(TranscriptEntry::from_record(&user)[0].role, Role::User);
        assert_eq!(TranscriptEntry::from_record(&agent)[0].role, Role::Agent);
        assert_eq!(TranscriptEntry::from_record(&bot)[0].role, Role::Assistant);
        assert!(TranscriptEntry::from_record(&empty).is_empty());
    }

    #[test]
    fn test_exchange_yields_both_sides() {
        let record = ChatRecord::exchange("s1", "question", "answer", ChatStatus::AgentHandling);
        let entries = TranscriptEntry::from_record(&record);

        assert_eq!(entries.len(), 2);
        assert_eq!((entries[0].role, entries[0].content.as_str()), (Role::User, "question"));
        assert_eq!((entries[1].role, entries[1].content.as_str()), (Role::Assistant, "answer"));
    }
}
