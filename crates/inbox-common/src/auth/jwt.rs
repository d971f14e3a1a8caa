//! JWT utilities for admin bearer authentication
//!
//! Provides token decoding and validation using the `jsonwebtoken` crate.
//! Tokens are HS256, issued by an external identity provider, and carry the
//! admin identity in `sub`.

use chrono::Utc;
use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Role claim required on admin tokens
pub const ADMIN_ROLE: &str = "admin";

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Subject (admin identifier, used for attribution)
    pub sub: String,
    /// Role granted by the token
    pub role: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AdminClaims {
    /// Check if the token is expired
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Check if the token grants admin access
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// JWT service for decoding admin tokens
#[derive(Clone)]
pub struct JwtService {
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Create a new JWT service with the given shared secret
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Decode and validate a JWT token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn decode_token(&self, token: &str) -> Result<AdminClaims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<AdminClaims>(token, &self.decoding_key, &validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            },
        )?;

        Ok(token_data.claims)
    }

    /// Validate an admin token and return the claims
    ///
    /// # Errors
    /// Returns an error if the token is invalid, expired, or lacks the admin role
    pub fn validate_admin_token(&self, token: &str) -> Result<AdminClaims, AppError> {
        let claims = self.decode_token(token)?;

        if !claims.is_admin() {
            return Err(AppError::InsufficientPermissions);
        }

        if claims.sub.trim().is_empty() {
            return Err(AppError::InvalidToken);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService").finish_non_exhaustive()
    }
}
