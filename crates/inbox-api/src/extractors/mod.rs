//! Axum extractors for request handling
//!
//! Custom extractors for admin authentication, validation, path ids, and list views.

mod auth;
mod path;
mod validated;
mod view;

pub use auth::AdminUser;
pub use path::MessageIdPath;
pub use validated::{OptionalValidatedJson, ValidatedJson};
pub use view::{ListView, ListViewParams};
