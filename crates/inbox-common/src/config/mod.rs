//! Configuration structs

mod app_config;

pub use app_config::{
    AdminAuthConfig, AdminAuthMode, AppConfig, AppSettings, ConfigError, CorsConfig,
    DatabaseConfig, EnvelopeStyle, Environment, InboxConfig, ServerConfig, StoreBackend,
    StoreConfig,
};
