//! Admin authentication extractor
//!
//! Checks the Authorization header against the configured credential verifier
//! before any admin handler touches the store.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{
        authorization::{Basic, Bearer},
        Authorization,
    },
    TypedHeader,
};
use inbox_common::{AdminIdentity, AppError, Credentials};

use crate::response::ApiError;
use crate::state::AppState;

/// Admin caller of a lifecycle route
///
/// `identity` is `None` when admin authentication is disabled.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub identity: Option<AdminIdentity>,
}

impl AdminUser {
    /// Name used as the default soft-delete attribution
    pub fn name(&self) -> Option<&str> {
        self.identity.as_ref().map(|identity| identity.name.as_str())
    }
}

async fn presented_credentials<S>(scheme: &str, parts: &mut Parts, state: &S) -> Option<Credentials>
where
    S: Send + Sync,
{
    if scheme == "Bearer" {
        TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|TypedHeader(Authorization(bearer))| Credentials::Bearer(bearer.token().to_string()))
    } else {
        TypedHeader::<Authorization<Basic>>::from_request_parts(parts, state)
            .await
            .ok()
            .map(|TypedHeader(Authorization(basic))| Credentials::Basic {
                username: basic.username().to_string(),
                password: basic.password().to_string(),
            })
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let verifier = app_state.service_context().verifier();

        let Some(scheme) = verifier.challenge() else {
            return Ok(AdminUser { identity: None });
        };

        let credentials = presented_credentials(scheme, parts, state)
            .await
            .ok_or(ApiError::Unauthorized {
                scheme,
                reason: AppError::MissingAuth,
            })?;

        // Argon2 is CPU-bound; keep it off the async workers
        let verified = tokio::task::spawn_blocking(move || verifier.verify(&credentials))
            .await
            .map_err(|e| ApiError::App(AppError::Internal(e.into())))?;

        match verified {
            Ok(identity) => Ok(AdminUser {
                identity: Some(identity),
            }),
            Err(e) if e.is_unauthorized() => {
                tracing::warn!(error = %e, "Admin authentication rejected");
                Err(ApiError::Unauthorized { scheme, reason: e })
            }
            Err(e) => Err(ApiError::App(e)),
        }
    }
}
