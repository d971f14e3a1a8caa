//! Domain entities - core business objects

mod message;

pub use message::{timestamp_now, ContactDetails, ContactField, Message, MessageState, NewMessage};
