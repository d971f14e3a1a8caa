//! # inbox-core
//!
//! Domain layer containing the contact message entity, its soft-delete lifecycle,
//! value objects, and the repository trait. This crate has zero dependencies on
//! infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{timestamp_now, ContactDetails, ContactField, Message, MessageState, NewMessage};
pub use error::DomainError;
pub use traits::{MessageRepository, MessageStats, RepoResult};
pub use value_objects::{MessageId, MessageIdParseError};
