//! Message handlers
//!
//! Public submission plus the admin inbox, trash, and lifecycle endpoints.

use axum::{extract::State, Json};
use inbox_service::{
    resolve_attribution, MessageResponse, MessageService, SoftDeleteRequest, StatsResponse,
    SubmitMessageRequest,
};

use crate::extractors::{AdminUser, ListView, MessageIdPath, OptionalValidatedJson, ValidatedJson};
use crate::response::{ApiResult, Created, Envelope};
use crate::state::AppState;

/// Submit a contact-form message (public)
///
/// POST /api/messages
pub async fn submit_message(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<SubmitMessageRequest>,
) -> ApiResult<Created<Envelope<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service.submit_message(request).await?;
    Ok(Created(Envelope::data(state.envelope(), response)))
}

/// List the inbox, or the trash with `?deleted=true`
///
/// GET /api/messages
pub async fn list_messages(
    State(state): State<AppState>,
    _admin: AdminUser,
    view: ListView,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let messages = match view {
        ListView::Inbox => service.list_inbox().await?,
        ListView::Trash => service.list_trash().await?,
    };
    Ok(Json(messages))
}

/// List the trash
///
/// GET /api/messages/deleted
pub async fn list_trash(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<Vec<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    Ok(Json(service.list_trash().await?))
}

/// Message counts per view
///
/// GET /api/messages/stats
pub async fn get_stats(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> ApiResult<Json<StatsResponse>> {
    let service = MessageService::new(state.service_context());
    Ok(Json(service.stats().await?))
}

/// Get one message in any state
///
/// GET /api/messages/{id}
pub async fn get_message(
    State(state): State<AppState>,
    _admin: AdminUser,
    MessageIdPath(id): MessageIdPath,
) -> ApiResult<Envelope<MessageResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service.get_message(id).await?;
    Ok(Envelope::data(state.envelope(), response))
}

/// Move a message to trash
///
/// DELETE /api/messages/{id}
pub async fn soft_delete_message(
    State(state): State<AppState>,
    admin: AdminUser,
    MessageIdPath(id): MessageIdPath,
    OptionalValidatedJson(body): OptionalValidatedJson<SoftDeleteRequest>,
) -> ApiResult<Envelope<MessageResponse>> {
    let explicit = body.as_ref().and_then(|b| b.admin.as_deref());
    let deleted_by = resolve_attribution(explicit, admin.name());

    let service = MessageService::new(state.service_context());
    let response = service.soft_delete(id, deleted_by).await?;
    Ok(Envelope::data(state.envelope(), response).with_message("Message moved to Trash"))
}

/// Bring a message back to the inbox
///
/// POST /api/messages/{id}/restore
pub async fn restore_message(
    State(state): State<AppState>,
    _admin: AdminUser,
    MessageIdPath(id): MessageIdPath,
) -> ApiResult<Envelope<MessageResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service.restore(id).await?;
    Ok(Envelope::data(state.envelope(), response).with_message("Message restored"))
}

/// Delete a message permanently
///
/// DELETE /api/messages/{id}/permanent
pub async fn purge_message(
    State(state): State<AppState>,
    _admin: AdminUser,
    MessageIdPath(id): MessageIdPath,
) -> ApiResult<Envelope<()>> {
    let service = MessageService::new(state.service_context());
    service.purge(id).await?;
    Ok(Envelope::message(state.envelope(), "Message permanently deleted"))
}
