//! Business logic services
//!
//! Service layer implementations that validate input and drive the message
//! lifecycle through the repository.

pub mod context;
pub mod error;
pub mod health;
pub mod message;
pub mod schema;

// Re-export all services for convenience
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use health::HealthService;
pub use message::{resolve_attribution, MessageService};
pub use schema::SubmissionSchema;
