//! Message service
//!
//! Handles submission intake, the inbox and trash views, and the
//! soft-delete / restore / purge lifecycle.

use tracing::{info, instrument, warn};

use inbox_core::{timestamp_now, ContactDetails, DomainError, MessageId, NewMessage};

use crate::dto::{MessageResponse, StatsResponse, SubmitMessageRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Pick the soft-delete attribution: an explicit non-blank name wins over
/// the authenticated admin identity.
pub fn resolve_attribution(explicit: Option<&str>, authenticated: Option<&str>) -> Option<String> {
    explicit
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .or_else(|| authenticated.map(str::trim).filter(|name| !name.is_empty()))
        .map(String::from)
}

/// Message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Validate and store a new submission
    #[instrument(skip(self, request))]
    pub async fn submit_message(&self, request: SubmitMessageRequest) -> ServiceResult<MessageResponse> {
        let contact = ContactDetails::new(request.email, request.phone, request.subject);
        let submission = NewMessage::new(&request.name, &request.message, contact)?;
        self.ctx.schema().check(submission.contact())?;

        let message = submission.into_message(MessageId::generate(), timestamp_now());
        self.ctx.message_repo().insert(&message).await?;

        info!(message_id = %message.id, "Message submitted");

        Ok(MessageResponse::from(message))
    }

    /// Active messages, newest first
    #[instrument(skip(self))]
    pub async fn list_inbox(&self) -> ServiceResult<Vec<MessageResponse>> {
        let messages = self.ctx.message_repo().find_active().await?;
        Ok(messages.into_iter().map(MessageResponse::from).collect())
    }

    /// Trashed messages, most recently deleted first
    #[instrument(skip(self))]
    pub async fn list_trash(&self) -> ServiceResult<Vec<MessageResponse>> {
        let messages = self.ctx.message_repo().find_deleted().await?;
        Ok(messages.into_iter().map(MessageResponse::from).collect())
    }

    /// Get one message in any state
    #[instrument(skip(self))]
    pub async fn get_message(&self, id: MessageId) -> ServiceResult<MessageResponse> {
        let message = self
            .ctx
            .message_repo()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::MessageNotFound(id))?;

        Ok(MessageResponse::from(message))
    }

    /// Move a message to trash. Re-applying re-stamps the time and attribution.
    #[instrument(skip(self))]
    pub async fn soft_delete(&self, id: MessageId, deleted_by: Option<String>) -> ServiceResult<MessageResponse> {
        let message = self
            .ctx
            .message_repo()
            .mark_deleted(id, timestamp_now(), deleted_by.as_deref())
            .await?
            .ok_or_else(|| {
                warn!(message_id = %id, "Soft delete of unknown message");
                DomainError::MessageNotFound(id)
            })?;

        info!(message_id = %id, deleted_by = ?message.deleted_by(), "Message moved to trash");

        Ok(MessageResponse::from(message))
    }

    /// Bring a message back to the inbox. No-op on an active message.
    #[instrument(skip(self))]
    pub async fn restore(&self, id: MessageId) -> ServiceResult<MessageResponse> {
        let message = self
            .ctx
            .message_repo()
            .mark_restored(id)
            .await?
            .ok_or(DomainError::MessageNotFound(id))?;

        info!(message_id = %id, "Message restored");

        Ok(MessageResponse::from(message))
    }

    /// Remove a message permanently, from any state
    #[instrument(skip(self))]
    pub async fn purge(&self, id: MessageId) -> ServiceResult<()> {
        if !self.ctx.message_repo().purge(id).await? {
            return Err(DomainError::MessageNotFound(id).into());
        }

        info!(message_id = %id, "Message permanently deleted");
        Ok(())
    }

    /// Message counts per view
    #[instrument(skip(self))]
    pub async fn stats(&self) -> ServiceResult<StatsResponse> {
        let stats = self.ctx.message_repo().count_by_state().await?;
        Ok(StatsResponse::from(stats))
    }
}
