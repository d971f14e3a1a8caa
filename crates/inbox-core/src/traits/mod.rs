//! Repository traits (ports)

mod repositories;

pub use repositories::{MessageRepository, MessageStats, RepoResult};
