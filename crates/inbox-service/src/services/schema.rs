//! Deployment-specific submission requirements

use inbox_core::{ContactDetails, ContactField, DomainError};

/// Contact fields a deployment requires on top of `name` and `message`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionSchema {
    required: Vec<ContactField>,
}

impl SubmissionSchema {
    pub fn new(required: impl IntoIterator<Item = ContactField>) -> Self {
        let mut fields = Vec::new();
        for field in required {
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        Self { required: fields }
    }

    pub fn required_fields(&self) -> &[ContactField] {
        &self.required
    }

    /// Reject contact details missing any required field
    ///
    /// # Errors
    /// `DomainError::MissingField` naming the first absent field
    pub fn check(&self, contact: &ContactDetails) -> Result<(), DomainError> {
        match self.required.iter().find(|field| contact.get(**field).is_none()) {
            Some(field) => Err(DomainError::MissingField(field.as_str())),
            None => Ok(()),
        }
    }
}
