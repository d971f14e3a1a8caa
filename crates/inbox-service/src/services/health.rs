//! Health service
//!
//! Probes the message store for readiness checks.

use tracing::{instrument, warn};

use crate::dto::ReadinessResponse;

use super::context::ServiceContext;

/// Health service
pub struct HealthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> HealthService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Check that the store answers a cheap query
    #[instrument(skip(self))]
    pub async fn readiness(&self) -> ReadinessResponse {
        let store_healthy = match self.ctx.message_repo().count_by_state().await {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Message store readiness check failed");
                false
            }
        };

        ReadinessResponse::ready(store_healthy)
    }
}
