//! Repository implementations
//!
//! PostgreSQL implementation of the `MessageRepository` trait defined in inbox-core.

mod error;
mod message;

pub use error::map_db_error;
pub use message::PgMessageRepository;
