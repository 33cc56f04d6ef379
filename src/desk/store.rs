//! Transcript persistence.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::desk::record::{ChatRecord, ChatStatus, SessionSummary};
use crate::error::Result;

/// Persistence for chat transcripts.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Append a record.
    async fn append(&self, record: ChatRecord) -> Result<()>;

    /// The last `limit` records of a session, oldest first.
    async fn recent(&self, session_id: &str, limit: usize) -> Result<Vec<ChatRecord>>;

    /// Every record of a session, oldest first.
    async fn session(&self, session_id: &str) -> Result<Vec<ChatRecord>>;

    /// Set the status of every record of a session; returns how many changed.
    async fn set_status(&self, session_id: &str, status: ChatStatus) -> Result<usize>;

    /// Sessions having records in any of `statuses`, most recently active
    /// first. Only the matching records are counted.
    async fn sessions_with_status(&self, statuses: &[ChatStatus]) -> Result<Vec<SessionSummary>>;
}

/// An in-memory message store.
///
/// Records are kept in insertion order, which is the chronological order
/// used by every read.
#[derive(Debug, Default)]
pub struct MemoryMessageStore {
    records: RwLock<Vec<ChatRecord>>,
}

impl MemoryMessageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn append(&self, record: ChatRecord) -> Result<()> {
        self.records.write().push(record);
        Ok(())
    }

    async fn recent(&self, session_id: &str, limit: usize) -> Result<Vec<ChatRecord>> {
        let records = self.records.read();
        let mut recent: Vec<ChatRecord> = records
            .iter()
            .rev()
            .filter(|r| r.session_id == session_id)
            .take(limit)
            .cloned()
            .collect();
        recent.reverse();
        Ok(recent)
    }

    async fn session(&self, session_id: &str) -> Result<Vec<ChatRecord>> {
        Ok(self
            .records
            .read()
            .iter()
            .filter(|r| r.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn set_status(&self, session_id: &str, status: ChatStatus) -> Result<usize> {
        let mut records = self.records.write();
        let mut changed = 0;
        for record in records.iter_mut().filter(|r| r.session_id == session_id) {
            record.status = status;
            changed += 1;
        }
        Ok(changed)
    }

    async fn sessions_with_status(&self, statuses: &[ChatStatus]) -> Result<Vec<SessionSummary>> {
        let records = self.records.read();
        let mut sessions: HashMap<&str, (DateTime<Utc>, usize)> = HashMap::new();

        for record in records.iter().filter(|r| statuses.contains(&r.status)) {
            let entry = sessions
                .entry(record.session_id.as_str())
                .or_insert((record.created_at, 0));
            entry.0 = entry.0.max(record.created_at);
            entry.1 += 1;
        }

        let mut summaries: Vec<SessionSummary> = sessions
            .into_iter()
            .map(|(session_id, (last_activity, message_count))| SessionSummary {
                session_id: session_id.to_string(),
                last_activity,
                message_count,
            })
            .collect();
        summaries.sort_by(|a, b| {
            b.last_activity
                .cmp(&a.last_activity)
                .then_with(|| a.session_id.cmp(&b.session_id))
        });

        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    #[tokio::test]
    async fn test_recent_is_chronological() {
        let store = MemoryMessageStore::new();
        for i in 0..7 {
            store
                .append(ChatRecord::exchange("s1", format!("q{i}"), format!("a{i}"), ChatStatus::Completed))
                .await
                .unwrap();
        }
        store
            .append(ChatRecord::exchange("s2", "other", "other", ChatStatus::Completed))
            .await
            .unwrap();

        let recent = store.recent("s1", 5).await.unwrap();
        let questions: Vec<_> = recent
            .iter()
            .map(|r| r.user_message.clone().unwrap())
            .collect();
        assert_eq!(questions, vec!["q2", "q3", "q4", "q5", "q6"]);

        assert_eq!(store.recent("s1", 0).await.unwrap().len(), 0);
        assert_eq!(store.recent("missing", 5).await.unwrap().len(), 0);
        assert_eq!(store.session("s1").await.unwrap().len(), 7);
        assert_eq!(store.len(), 8);
    }

    #[tokio::test]
    async fn test_set_status_scoped_to_session() {
        let store = MemoryMessageStore::new();
        store
            .append(ChatRecord::from_user("s1", "a", ChatStatus::Completed))
            .await
            .unwrap();
        store
            .append(ChatRecord::from_user("s1", "b", ChatStatus::NeedsHandoff))
            .await
            .unwrap();
        store
            .append(ChatRecord::from_user("s2", "c", ChatStatus::Completed))
            .await
            .unwrap();

        assert_eq!(store.set_status("s1", ChatStatus::Closed).await.unwrap(), 2);
        assert!(
            store
                .session("s1")
                .await
                .unwrap()
                .iter()
                .all(|r| r.status == ChatStatus::Closed)
        );
        assert_eq!(
            store.session("s2").await.unwrap()[0].status,
            ChatStatus::Completed
        );
    }

    #[tokio::test]
    async fn test_sessions_with_status_sorted_by_activity() {
        let store = MemoryMessageStore::new();
        let base = Utc::now();

        store
            .append(ChatRecord::from_user("old", "a", ChatStatus::NeedsHandoff).at(base))
            .await
            .unwrap();
        store
            .append(
                ChatRecord::from_user("new", "b", ChatStatus::PendingAgent)
                    .at(base + Duration::seconds(10)),
            )
            .await
            .unwrap();
        store
            .append(
                ChatRecord::from_user("new", "c", ChatStatus::NeedsHandoff)
                    .at(base + Duration::seconds(20)),
            )
            .await
            .unwrap();
        store
            .append(
                ChatRecord::from_user("done", "d", ChatStatus::Completed)
                    .at(base + Duration::seconds(30)),
            )
            .await
            .unwrap();

        let summaries = store
            .sessions_with_status(&ChatStatus::PENDING)
            .await
            .unwrap();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].session_id, "new");
        assert_eq!(summaries[0].message_count, 2);
        assert_eq!(summaries[0].last_activity, base + Duration::seconds(20));
        assert_eq!(summaries[1].session_id, "old");
    }
}
