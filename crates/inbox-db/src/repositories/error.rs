//! Error handling utilities for repositories

use inbox_core::DomainError;
use sqlx::Error as SqlxError;
use tracing::error;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    error!(error = %e, "Message store query failed");
    DomainError::StoreFailure(e.to_string())
}
