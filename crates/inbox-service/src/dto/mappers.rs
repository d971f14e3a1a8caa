//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use inbox_core::{Message, MessageStats};

use super::responses::{MessageResponse, StatsResponse};

impl From<&Message> for MessageResponse {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id.to_string(),
            name: message.name.clone(),
            email: message.contact.email.clone(),
            phone: message.contact.phone.clone(),
            subject: message.contact.subject.clone(),
            message: message.content.clone(),
            created_at: message.created_at,
            deleted: message.is_deleted(),
            deleted_at: message.deleted_at(),
            deleted_by: message.deleted_by().map(String::from),
        }
    }
}

impl From<Message> for MessageResponse {
    fn from(message: Message) -> Self {
        Self::from(&message)
    }
}

impl From<MessageStats> for StatsResponse {
    fn from(stats: MessageStats) -> Self {
        Self {
            active: stats.active,
            trashed: stats.trashed,
            total: stats.active + stats.trashed,
        }
    }
}
