//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation. Every method touches at most one record and
//! relies on the backing store's single-record atomicity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::entities::Message;
use crate::error::DomainError;
use crate::value_objects::MessageId;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Number of messages in each view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MessageStats {
    pub active: i64,
    pub trashed: i64,
}

// ============================================================================
// Message Repository
// ============================================================================

#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Persist a newly created message
    async fn insert(&self, message: &Message) -> RepoResult<()>;

    /// Find message by ID, in any state
    async fn find_by_id(&self, id: MessageId) -> RepoResult<Option<Message>>;

    /// Messages not in the trash, newest `created_at` first
    async fn find_active(&self) -> RepoResult<Vec<Message>>;

    /// Trashed messages, most recently deleted first
    async fn find_deleted(&self) -> RepoResult<Vec<Message>>;

    /// Move a message to trash, re-stamping if already trashed.
    /// Returns the updated message, or `None` if it does not exist.
    async fn mark_deleted(
        &self,
        id: MessageId,
        deleted_at: DateTime<Utc>,
        deleted_by: Option<&str>,
    ) -> RepoResult<Option<Message>>;

    /// Clear the trash flag, attribution, and timestamp.
    /// Returns the updated message, or `None` if it does not exist.
    async fn mark_restored(&self, id: MessageId) -> RepoResult<Option<Message>>;

    /// Remove a message permanently. Returns whether a message was removed.
    async fn purge(&self, id: MessageId) -> RepoResult<bool>;

    /// Count messages per view
    async fn count_by_state(&self) -> RepoResult<MessageStats>;
}
