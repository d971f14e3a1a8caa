//! Entity to model mappers
//!
//! - `From<MessageModel> for Message`: convert database rows to domain objects
//! - `MessageInsert`: prepare entity data for insertion

mod message;

pub use message::MessageInsert;
