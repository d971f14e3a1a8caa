//! In-memory implementation of MessageRepository

use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::instrument;

use inbox_core::{Message, MessageId, MessageRepository, MessageStats, RepoResult};

/// In-memory implementation of MessageRepository
///
/// One write lock per call makes every operation atomic for its record.
/// Clones share the same underlying map.
#[derive(Clone, Default)]
pub struct InMemoryMessageRepository {
    messages: Arc<RwLock<HashMap<MessageId, Message>>>,
}

impl InMemoryMessageRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored messages in any state
    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn insert(&self, message: &Message) -> RepoResult<()> {
        self.messages.write().insert(message.id, message.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: MessageId) -> RepoResult<Option<Message>> {
        Ok(self.messages.read().get(&id).cloned())
    }

    #[instrument(skip(self))]
    async fn find_active(&self) -> RepoResult<Vec<Message>> {
        let mut active: Vec<Message> = self
            .messages
            .read()
            .values()
            .filter(|m| !m.is_deleted())
            .cloned()
            .collect();
        active.sort_by_key(|m| Reverse(m.created_at));

        Ok(active)
    }

    #[instrument(skip(self))]
    async fn find_deleted(&self) -> RepoResult<Vec<Message>> {
        let mut trashed: Vec<Message> = self
            .messages
            .read()
            .values()
            .filter(|m| m.is_deleted())
            .cloned()
            .collect();
        trashed.sort_by_key(|m| Reverse(m.deleted_at()));

        Ok(trashed)
    }

    #[instrument(skip(self))]
    async fn mark_deleted(
        &self,
        id: MessageId,
        deleted_at: DateTime<Utc>,
        deleted_by: Option<&str>,
    ) -> RepoResult<Option<Message>> {
        let mut messages = self.messages.write();

        Ok(messages.get_mut(&id).map(|message| {
            message.soft_delete(deleted_at, deleted_by.map(String::from));
            message.clone()
        }))
    }

    #[instrument(skip(self))]
    async fn mark_restored(&self, id: MessageId) -> RepoResult<Option<Message>> {
        let mut messages = self.messages.write();

        Ok(messages.get_mut(&id).map(|message| {
            message.restore();
            message.clone()
        }))
    }

    #[instrument(skip(self))]
    async fn purge(&self, id: MessageId) -> RepoResult<bool> {
        Ok(self.messages.write().remove(&id).is_some())
    }

    #[instrument(skip(self))]
    async fn count_by_state(&self) -> RepoResult<MessageStats> {
        let messages = self.messages.read();
        let trashed = messages.values().filter(|m| m.is_deleted()).count();

        Ok(MessageStats {
            active: (messages.len() - trashed) as i64,
            trashed: trashed as i64,
        })
    }
}
