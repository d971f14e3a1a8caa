//! Admin authentication
//!
//! Admin routes run a [`CredentialVerifier`] before touching the store. The
//! verifier is chosen from configuration: HTTP basic (argon2-checked password),
//! bearer JWT, or open access.

mod credentials;
mod jwt;
mod password;

pub use credentials::{
    build_verifier, AdminIdentity, BasicCredentialVerifier, BearerCredentialVerifier,
    CredentialVerifier, Credentials, OpenAccess,
};
pub use jwt::{AdminClaims, JwtService};
pub use password::{hash_password, verify_password};
