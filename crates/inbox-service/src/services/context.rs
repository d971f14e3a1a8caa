//! Service context - dependency container for services
//!
//! Holds the message store, admin credential verifier, and submission schema.

use std::sync::Arc;

use inbox_common::{CredentialVerifier, OpenAccess};
use inbox_core::MessageRepository;

use super::error::{ServiceError, ServiceResult};
use super::schema::SubmissionSchema;

/// Service context containing all dependencies
///
/// Constructed once at startup and shared by every request.
#[derive(Clone)]
pub struct ServiceContext {
    message_repo: Arc<dyn MessageRepository>,
    verifier: Arc<dyn CredentialVerifier>,
    schema: SubmissionSchema,
}

impl ServiceContext {
    /// Create a new service context
    pub fn new(
        message_repo: Arc<dyn MessageRepository>,
        verifier: Arc<dyn CredentialVerifier>,
        schema: SubmissionSchema,
    ) -> Self {
        Self {
            message_repo,
            verifier,
            schema,
        }
    }

    /// Get the message repository
    pub fn message_repo(&self) -> &dyn MessageRepository {
        self.message_repo.as_ref()
    }

    /// Get a shared handle to the admin credential verifier
    pub fn verifier(&self) -> Arc<dyn CredentialVerifier> {
        Arc::clone(&self.verifier)
    }

    /// Get the submission schema
    pub fn schema(&self) -> &SubmissionSchema {
        &self.schema
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("message_repo", &"MessageRepository")
            .field("verifier", &self.verifier.challenge())
            .field("schema", &self.schema)
            .finish()
    }
}

/// Builder for creating ServiceContext
///
/// The verifier defaults to open access and the schema to no extra fields.
#[derive(Default)]
pub struct ServiceContextBuilder {
    message_repo: Option<Arc<dyn MessageRepository>>,
    verifier: Option<Arc<dyn CredentialVerifier>>,
    schema: SubmissionSchema,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message_repo(mut self, repo: Arc<dyn MessageRepository>) -> Self {
        self.message_repo = Some(repo);
        self
    }

    pub fn verifier(mut self, verifier: Arc<dyn CredentialVerifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    pub fn schema(mut self, schema: SubmissionSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if the message repository is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.message_repo
                .ok_or_else(|| ServiceError::validation("message_repo is required"))?,
            self.verifier.unwrap_or_else(|| Arc::new(OpenAccess)),
            self.schema,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inbox_db::InMemoryMessageRepository;

    #[test]
    fn test_builder_requires_repository() {
        let err = ServiceContextBuilder::new().build().unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_builder_defaults() {
        let ctx = ServiceContextBuilder::new()
            .message_repo(Arc::new(InMemoryMessageRepository::new()))
            .build()
            .unwrap();

        assert_eq!(ctx.verifier().challenge(), None);
        assert!(ctx.schema().required_fields().is_empty());
    }
}
