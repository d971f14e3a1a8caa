//! Process-local message store
//!
//! Backs `STORE_BACKEND=memory` deployments and the test suites. Contents are
//! lost when the process exits.

mod message;

pub use message::InMemoryMessageRepository;
