//! List view extractor
//!
//! Selects the inbox or the trash from the `deleted` query parameter.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::response::ApiError;

/// Raw list query parameters
#[derive(Debug, Default, Deserialize)]
pub struct ListViewParams {
    #[serde(default)]
    pub deleted: Option<String>,
}

/// Which view a list request targets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListView {
    #[default]
    Inbox,
    Trash,
}

impl TryFrom<ListViewParams> for ListView {
    type Error = ApiError;

    fn try_from(params: ListViewParams) -> Result<Self, Self::Error> {
        let Some(raw) = params.deleted else {
            return Ok(Self::Inbox);
        };

        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "false" | "0" => Ok(Self::Inbox),
            "true" | "1" => Ok(Self::Trash),
            _ => Err(ApiError::invalid_query(format!(
                "'deleted' must be true or false, got '{}'",
                raw.trim()
            ))),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ListView
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<ListViewParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        ListView::try_from(params)
    }
}
