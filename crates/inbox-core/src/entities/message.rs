//! Message entity - a submitted contact-form message and its trash lifecycle

use chrono::{DateTime, SubsecRound, Utc};

use crate::error::DomainError;
use crate::value_objects::MessageId;

/// Current time truncated to the microsecond precision PostgreSQL keeps
///
/// Timestamps taken here survive a store round trip unchanged.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Optional contact attributes supplied with a submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDetails {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
}

impl ContactDetails {
    /// Build contact details, dropping blank values
    pub fn new(email: Option<String>, phone: Option<String>, subject: Option<String>) -> Self {
        Self {
            email: non_blank(email),
            phone: non_blank(phone),
            subject: non_blank(subject),
        }
    }
}

/// Names of the optional contact attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Email,
    Phone,
    Subject,
}

impl ContactField {
    /// Wire name of the field
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Subject => "subject",
        }
    }

    /// Parse a wire name, case-insensitively
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Some(Self::Email),
            "phone" => Some(Self::Phone),
            "subject" => Some(Self::Subject),
            _ => None,
        }
    }
}

impl ContactDetails {
    /// Look up one contact attribute by name
    pub fn get(&self, field: ContactField) -> Option<&str> {
        match field {
            ContactField::Email => self.email.as_deref(),
            ContactField::Phone => self.phone.as_deref(),
            ContactField::Subject => self.subject.as_deref(),
        }
    }
}

/// Soft-delete state of a message
///
/// A purged message has no state: it no longer exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MessageState {
    /// Visible in the inbox
    #[default]
    Active,
    /// Moved to trash, restorable
    Trashed {
        deleted_at: DateTime<Utc>,
        deleted_by: Option<String>,
    },
}

impl MessageState {
    /// Rebuild the state from the persisted `deleted` / `deleted_at` / `deleted_by` columns.
    ///
    /// Storage guarantees `deleted == deleted_at.is_some()`; a trashed row always
    /// carries its timestamp.
    pub fn from_columns(
        deleted: bool,
        deleted_at: Option<DateTime<Utc>>,
        deleted_by: Option<String>,
    ) -> Self {
        match deleted_at.filter(|_| deleted) {
            Some(deleted_at) => Self::Trashed {
                deleted_at,
                deleted_by,
            },
            None => Self::Active,
        }
    }

    #[inline]
    pub fn is_trashed(&self) -> bool {
        matches!(self, Self::Trashed { .. })
    }
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub name: String,
    pub contact: ContactDetails,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub state: MessageState,
}

impl Message {
    /// Check if the message is in the trash
    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.state.is_trashed()
    }

    /// When the message was moved to trash
    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        match &self.state {
            MessageState::Trashed { deleted_at, .. } => Some(*deleted_at),
            MessageState::Active => None,
        }
    }

    /// Who moved the message to trash
    pub fn deleted_by(&self) -> Option<&str> {
        match &self.state {
            MessageState::Trashed { deleted_by, .. } => deleted_by.as_deref(),
            MessageState::Active => None,
        }
    }

    /// Move the message to trash.
    ///
    /// Applying this to an already trashed message re-stamps the time and attribution.
    pub fn soft_delete(&mut self, at: DateTime<Utc>, by: Option<String>) {
        self.state = MessageState::Trashed {
            deleted_at: at,
            deleted_by: non_blank(by),
        };
    }

    /// Bring the message back to the inbox. No-op on an active message.
    pub fn restore(&mut self) {
        self.state = MessageState::Active;
    }
}

/// A validated submission that has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    name: String,
    content: String,
    contact: ContactDetails,
}

impl NewMessage {
    /// Validate required fields. `name` and `content` must contain non-whitespace text.
    ///
    /// The text is kept as submitted.
    pub fn new(name: &str, content: &str, contact: ContactDetails) -> Result<Self, DomainError> {
        if name.trim().is_empty() {
            return Err(DomainError::MissingField("name"));
        }

        if content.trim().is_empty() {
            return Err(DomainError::MissingField("message"));
        }

        Ok(Self {
            name: name.to_string(),
            content: content.to_string(),
            contact,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn contact(&self) -> &ContactDetails {
        &self.contact
    }

    /// Assign identity and creation time, producing an active message
    pub fn into_message(self, id: MessageId, created_at: DateTime<Utc>) -> Message {
        Message {
            id,
            name: self.name,
            contact: self.contact,
            content: self.content,
            created_at,
            state: MessageState::Active,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
