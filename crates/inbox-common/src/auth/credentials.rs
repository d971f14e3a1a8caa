//! Pluggable admin credential verification

use std::fmt;
use std::sync::Arc;

use crate::config::{AdminAuthConfig, AdminAuthMode};
use crate::error::AppError;

use super::jwt::JwtService;
use super::password::{hash_password, is_valid_hash, verify_password};

/// Credentials presented with an admin request
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    Basic { username: String, password: String },
    Bearer(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            Self::Bearer(_) => f.write_str("Bearer(..)"),
        }
    }
}

/// An authenticated administrator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    /// Identifier recorded as the soft-delete attribution
    pub name: String,
}

impl AdminIdentity {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Verifies admin credentials before a lifecycle operation runs
pub trait CredentialVerifier: Send + Sync {
    /// Scheme announced in `WWW-Authenticate`, or `None` when admin routes are open
    fn challenge(&self) -> Option<&'static str>;

    /// Check the presented credentials
    ///
    /// # Errors
    /// `InvalidCredentials`/`InvalidToken`/`TokenExpired` on mismatch, `InvalidInput`
    /// when the scheme does not match the verifier
    fn verify(&self, credentials: &Credentials) -> Result<AdminIdentity, AppError>;
}

/// No authentication: every request is admitted without an identity
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenAccess;

impl CredentialVerifier for OpenAccess {
    fn challenge(&self) -> Option<&'static str> {
        None
    }

    fn verify(&self, _credentials: &Credentials) -> Result<AdminIdentity, AppError> {
        Err(AppError::InvalidInput(
            "admin authentication is disabled".to_string(),
        ))
    }
}

/// HTTP basic auth against one configured admin account
pub struct BasicCredentialVerifier {
    username: String,
    password_hash: String,
}

impl BasicCredentialVerifier {
    /// Create from a plaintext password, hashing it with Argon2id
    ///
    /// # Errors
    /// Returns an error if hashing fails
    pub fn new(username: impl Into<String>, password: &str) -> Result<Self, AppError> {
        Ok(Self {
            username: username.into(),
            password_hash: hash_password(password)?,
        })
    }

    /// Create from a precomputed Argon2 PHC hash
    ///
    /// # Errors
    /// Returns `AppError::Config` if the hash cannot be parsed
    pub fn with_hash(username: impl Into<String>, password_hash: impl Into<String>) -> Result<Self, AppError> {
        let password_hash = password_hash.into();
        if !is_valid_hash(&password_hash) {
            return Err(AppError::Config(
                "ADMIN_PASSWORD_HASH is not a valid argon2 hash".to_string(),
            ));
        }

        Ok(Self {
            username: username.into(),
            password_hash,
        })
    }
}

impl CredentialVerifier for BasicCredentialVerifier {
    fn challenge(&self) -> Option<&'static str> {
        Some("Basic")
    }

    fn verify(&self, credentials: &Credentials) -> Result<AdminIdentity, AppError> {
        let Credentials::Basic { username, password } = credentials else {
            return Err(AppError::InvalidInput("expected basic credentials".to_string()));
        };

        // Always run the hash check so a wrong username costs the same as a wrong password
        let password_ok = verify_password(password, &self.password_hash)?;
        if password_ok && *username == self.username {
            Ok(AdminIdentity::new(username.clone()))
        } else {
            Err(AppError::InvalidCredentials)
        }
    }
}

impl fmt::Debug for BasicCredentialVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicCredentialVerifier")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Bearer JWT auth
#[derive(Debug, Clone)]
pub struct BearerCredentialVerifier {
    jwt: JwtService,
}

impl BearerCredentialVerifier {
    pub fn new(jwt: JwtService) -> Self {
        Self { jwt }
    }
}

impl CredentialVerifier for BearerCredentialVerifier {
    fn challenge(&self) -> Option<&'static str> {
        Some("Bearer")
    }

    fn verify(&self, credentials: &Credentials) -> Result<AdminIdentity, AppError> {
        let Credentials::Bearer(token) = credentials else {
            return Err(AppError::InvalidInput("expected bearer token".to_string()));
        };

        let claims = self.jwt.validate_admin_token(token)?;
        Ok(AdminIdentity::new(claims.sub))
    }
}

/// Build the verifier selected by configuration
///
/// # Errors
/// Returns `AppError::Config` when the selected mode lacks its settings
pub fn build_verifier(config: &AdminAuthConfig) -> Result<Arc<dyn CredentialVerifier>, AppError> {
    match config.mode {
        AdminAuthMode::None => Ok(Arc::new(OpenAccess)),
        AdminAuthMode::Basic => {
            let username = config
                .username
                .clone()
                .ok_or_else(|| AppError::Config("ADMIN_USERNAME is required".to_string()))?;

            let verifier = match (&config.password_hash, &config.password) {
                (Some(hash), _) => BasicCredentialVerifier::with_hash(username, hash.clone())?,
                (None, Some(password)) => BasicCredentialVerifier::new(username, password)?,
                (None, None) => {
                    return Err(AppError::Config("ADMIN_PASSWORD is required".to_string()))
                }
            };
            Ok(Arc::new(verifier))
        }
        AdminAuthMode::Bearer => {
            let secret = config
                .jwt_secret
                .as_deref()
                .ok_or_else(|| AppError::Config("JWT_SECRET is required".to_string()))?;
            Ok(Arc::new(BearerCredentialVerifier::new(JwtService::new(secret))))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(username: &str, password: &str) -> Credentials {
        Credentials::Basic {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_basic_verifier() {
        let verifier = BasicCredentialVerifier::new("admin", "s3cret").unwrap();
        assert_eq!(verifier.challenge(), Some("Basic"));

        let identity = verifier.verify(&basic("admin", "s3cret")).unwrap();
        assert_eq!(identity.name, "admin");

        assert!(matches!(
            verifier.verify(&basic("admin", "wrong")),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            verifier.verify(&basic("root", "s3cret")),
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            verifier.verify(&Credentials::Bearer("token".to_string())),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_basic_verifier_with_hash() {
        let hash = hash_password("s3cret").unwrap();
        let verifier = BasicCredentialVerifier::with_hash("admin", hash).unwrap();
        assert!(verifier.verify(&basic("admin", "s3cret")).is_ok());

        assert!(matches!(
            BasicCredentialVerifier::with_hash("admin", "plaintext"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_bearer_verifier() {
        let token = crate::auth::jwt::issuer::issue("bearer-test-secret", "ops", 300);
        let verifier = BearerCredentialVerifier::new(JwtService::new("bearer-test-secret"));

        let identity = verifier.verify(&Credentials::Bearer(token)).unwrap();
        assert_eq!(identity.name, "ops");

        assert!(matches!(
            verifier.verify(&Credentials::Bearer("garbage".to_string())),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_build_verifier_from_config() {
        let verifier = build_verifier(&AdminAuthConfig::open()).unwrap();
        assert_eq!(verifier.challenge(), None);

        let verifier = build_verifier(&AdminAuthConfig::basic("admin", "pw")).unwrap();
        assert_eq!(verifier.challenge(), Some("Basic"));
        assert!(verifier.verify(&basic("admin", "pw")).is_ok());

        let mut config = AdminAuthConfig::open();
        config.mode = AdminAuthMode::Bearer;
        assert!(matches!(build_verifier(&config), Err(AppError::Config(_))));
    }

    #[test]
    fn test_credentials_debug_hides_secret() {
        let debug = format!("{:?}", basic("admin", "s3cret"));
        assert!(!debug.contains("s3cret"));
    }
}
