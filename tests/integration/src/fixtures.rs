//! Test fixtures and data generators
//!
//! Provides reusable request and response shapes for integration tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// Contact-form submission
#[derive(Debug, Clone, Serialize)]
pub struct SubmitMessage {
    pub name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl SubmitMessage {
    pub fn new(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            email: None,
            phone: None,
            subject: None,
        }
    }

    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: Some(format!("visitor{suffix}@example.com")),
            ..Self::new(&format!("Visitor {suffix}"), "Hello from the contact form")
        }
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }
}

/// Soft-delete body
#[derive(Debug, Serialize)]
pub struct SoftDelete {
    pub admin: String,
}

/// Message record as returned by the API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageBody {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub deleted: bool,
    pub deleted_at: Option<DateTime<Utc>>,
    pub deleted_by: Option<String>,
}

/// Write-operation envelope with the default `success` flag
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

/// Error response body
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error detail
#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

/// Inbox counts
#[derive(Debug, Deserialize)]
pub struct Stats {
    pub active: i64,
    pub trashed: i64,
    pub total: i64,
}
