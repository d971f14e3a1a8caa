//! Route definitions
//!
//! Message routes mounted under /api/messages, health routes at the root.

use axum::{
    routing::{delete, get, post},
    Router,
};
use inbox_common::InboxConfig;

use crate::handlers::{health, messages};
use crate::state::AppState;

/// Create the API router (excluding health, which is merged separately)
pub fn create_router(inbox: &InboxConfig) -> Router<AppState> {
    Router::new().nest("/api", message_routes(inbox))
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

/// Message routes
fn message_routes(inbox: &InboxConfig) -> Router<AppState> {
    let router = Router::new()
        .route(
            "/messages",
            post(messages::submit_message).get(messages::list_messages),
        )
        // Static segments win over `:id`
        .route("/messages/deleted", get(messages::list_trash))
        .route("/messages/stats", get(messages::get_stats))
        .route(
            "/messages/:id",
            get(messages::get_message).delete(messages::soft_delete_message),
        )
        .route("/messages/:id/restore", post(messages::restore_message));

    if inbox.permanent_delete {
        router.route("/messages/:id/permanent", delete(messages::purge_message))
    } else {
        router
    }
}
