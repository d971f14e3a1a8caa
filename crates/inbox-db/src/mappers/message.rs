//! Message entity <-> model mapper

use chrono::{DateTime, Utc};
use uuid::Uuid;

use inbox_core::{ContactDetails, Message, MessageId, MessageState};

use crate::models::MessageModel;

/// Convert MessageModel to Message entity
impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: MessageId::from_uuid(model.id),
            name: model.name,
            contact: ContactDetails {
                email: model.email,
                phone: model.phone,
                subject: model.subject,
            },
            content: model.message,
            created_at: model.created_at,
            state: MessageState::from_columns(model.deleted, model.deleted_at, model.deleted_by),
        }
    }
}

/// Borrowed column values for inserting a Message
pub struct MessageInsert<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub subject: Option<&'a str>,
    pub message: &'a str,
    pub created_at: DateTime<Utc>,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<&'a str>,
}

impl<'a> MessageInsert<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self {
            id: message.id.into_inner(),
            name: &message.name,
            email: message.contact.email.as_deref(),
            phone: message.contact.phone.as_deref(),
            subject: message.contact.subject.as_deref(),
            message: &message.content,
            created_at: message.created_at,
            deleted: message.is_deleted(),
            deleted_at: message.deleted_at(),
            deleted_by: message.deleted_by(),
        }
    }
}
