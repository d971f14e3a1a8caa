//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

/// Public contact-form submission
///
/// `name` and `message` default to empty so that a missing field surfaces as a
/// field-level validation error rather than a body parse error.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SubmitMessageRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Name must be 1-200 characters"))]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 320, message = "Email must be at most 320 characters"))]
    pub email: Option<String>,

    #[serde(default)]
    #[validate(length(max = 50, message = "Phone must be at most 50 characters"))]
    pub phone: Option<String>,

    #[serde(default)]
    #[validate(length(max = 200, message = "Subject must be at most 200 characters"))]
    pub subject: Option<String>,

    #[serde(default)]
    #[validate(length(min = 1, max = 10000, message = "Message must be 1-10000 characters"))]
    pub message: String,
}

/// Optional body of a soft-delete request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SoftDeleteRequest {
    /// Who is moving the message to trash
    #[validate(length(max = 100, message = "Admin must be at most 100 characters"))]
    pub admin: Option<String>,
}
