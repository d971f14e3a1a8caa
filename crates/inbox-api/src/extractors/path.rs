//! Path parameter extractors

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use inbox_core::MessageId;

use crate::response::ApiError;

/// Message id from the `:id` path segment
///
/// An id that does not parse is rejected exactly like an id that does not exist.
#[derive(Debug, Clone, Copy)]
pub struct MessageIdPath(pub MessageId);

#[async_trait]
impl<S> FromRequestParts<S> for MessageIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        MessageId::parse(&raw)
            .map(MessageIdPath)
            .map_err(|_| ApiError::UnknownMessage)
    }
}
