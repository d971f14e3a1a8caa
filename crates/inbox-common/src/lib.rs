//! # inbox-common
//!
//! Shared utilities including configuration, error handling, admin authentication, and telemetry.

pub mod auth;
pub mod config;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use auth::{
    build_verifier, hash_password, verify_password, AdminClaims, AdminIdentity,
    BasicCredentialVerifier, BearerCredentialVerifier, CredentialVerifier, Credentials,
    JwtService, OpenAccess,
};
pub use config::{
    AdminAuthConfig, AdminAuthMode, AppConfig, AppSettings, ConfigError, CorsConfig,
    DatabaseConfig, EnvelopeStyle, Environment, InboxConfig, ServerConfig, StoreBackend,
    StoreConfig,
};
pub use error::AppError;
pub use telemetry::{
    init_tracing, init_tracing_with_config, try_init_tracing, try_init_tracing_with_config,
    TracingConfig, TracingError,
};
