//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use std::env;
use std::fmt;

use inbox_core::ContactField;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub store: StoreConfig,
    pub cors: CorsConfig,
    pub admin: AdminAuthConfig,
    pub inbox: InboxConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Which message store backs the inbox
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Process-local store, lost on restart
    Memory,
}

/// Message store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Present when `backend` is `Postgres`
    pub database: Option<DatabaseConfig>,
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    /// Empty or containing `*` means any origin
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    #[must_use]
    pub fn allows_any(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// How admin routes authenticate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAuthMode {
    /// HTTP basic auth against a configured username/password
    Basic,
    /// HS256 JWT bearer token
    Bearer,
    /// No authentication (development only)
    None,
}

/// Admin authentication configuration
#[derive(Clone)]
pub struct AdminAuthConfig {
    pub mode: AdminAuthMode,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Argon2 PHC string, preferred over `password`
    pub password_hash: Option<String>,
    pub jwt_secret: Option<String>,
}

impl AdminAuthConfig {
    /// Admin routes open to everyone
    #[must_use]
    pub fn open() -> Self {
        Self {
            mode: AdminAuthMode::None,
            username: None,
            password: None,
            password_hash: None,
            jwt_secret: None,
        }
    }

    /// Basic auth with a plaintext password (hashed at startup)
    #[must_use]
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            mode: AdminAuthMode::Basic,
            username: Some(username.into()),
            password: Some(password.into()),
            password_hash: None,
            jwt_secret: None,
        }
    }
}

impl fmt::Debug for AdminAuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminAuthConfig")
            .field("mode", &self.mode)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("password_hash", &self.password_hash.as_ref().map(|_| "<redacted>"))
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Shape of write-operation response envelopes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnvelopeStyle {
    /// `{"success": true, ...}`
    #[default]
    Success,
    /// `{"ok": true, ...}`
    Ok,
}

impl EnvelopeStyle {
    /// Name of the boolean flag key
    #[must_use]
    pub fn flag_key(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Ok => "ok",
        }
    }
}

/// Deployment-specific inbox behaviour
#[derive(Debug, Clone)]
pub struct InboxConfig {
    /// Contact fields a submission must carry in addition to name and message
    pub required_fields: Vec<ContactField>,
    pub envelope: EnvelopeStyle,
    /// Whether the permanent-delete route is mounted
    pub permanent_delete: bool,
}

impl Default for InboxConfig {
    fn default() -> Self {
        Self {
            required_fields: Vec::new(),
            envelope: EnvelopeStyle::default(),
            permanent_delete: true,
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "contact-inbox".to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or malformed
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required variables are missing or malformed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let app = AppSettings {
            name: var("APP_NAME").unwrap_or_else(default_app_name),
            env: match var("APP_ENV") {
                Some(s) => Environment::parse(&s)
                    .ok_or(ConfigError::InvalidValue("APP_ENV", s))?,
                None => Environment::default(),
            },
        };

        let api = ServerConfig {
            host: var("API_HOST").unwrap_or_else(default_host),
            port: match var("API_PORT").or_else(|| var("PORT")) {
                Some(s) => s
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue("API_PORT", s))?,
                None => default_port(),
            },
        };

        let backend = match var("STORE_BACKEND").map(|s| s.to_lowercase()) {
            None => StoreBackend::Postgres,
            Some(s) if s == "postgres" || s == "postgresql" => StoreBackend::Postgres,
            Some(s) if s == "memory" => StoreBackend::Memory,
            Some(s) => return Err(ConfigError::InvalidValue("STORE_BACKEND", s)),
        };

        let database = match backend {
            StoreBackend::Postgres => Some(DatabaseConfig {
                url: var("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?,
                max_connections: parse_or(&var, "DATABASE_MAX_CONNECTIONS", default_max_connections)?,
                min_connections: parse_or(&var, "DATABASE_MIN_CONNECTIONS", default_min_connections)?,
            }),
            StoreBackend::Memory => None,
        };

        let cors = CorsConfig {
            allowed_origins: var("CORS_ALLOWED_ORIGINS")
                .or_else(|| var("CLIENT_ORIGIN"))
                .map(|s| split_list(&s))
                .unwrap_or_default(),
        };

        let admin = Self::admin_from(&var)?;
        let inbox = Self::inbox_from(&var)?;

        Ok(Self {
            app,
            api,
            store: StoreConfig { backend, database },
            cors,
            admin,
            inbox,
        })
    }

    fn admin_from<V>(var: &V) -> Result<AdminAuthConfig, ConfigError>
    where
        V: Fn(&str) -> Option<String>,
    {
        let username = var("ADMIN_USERNAME");
        let password = var("ADMIN_PASSWORD");
        let password_hash = var("ADMIN_PASSWORD_HASH");
        let jwt_secret = var("JWT_SECRET");

        let mode = match var("ADMIN_AUTH_MODE").map(|s| s.to_lowercase()) {
            Some(s) if s == "basic" => AdminAuthMode::Basic,
            Some(s) if s == "bearer" || s == "jwt" => AdminAuthMode::Bearer,
            Some(s) if s == "none" => AdminAuthMode::None,
            Some(s) => return Err(ConfigError::InvalidValue("ADMIN_AUTH_MODE", s)),
            None if username.is_some() => AdminAuthMode::Basic,
            None => AdminAuthMode::None,
        };

        match mode {
            AdminAuthMode::Basic => {
                if username.is_none() {
                    return Err(ConfigError::MissingVar("ADMIN_USERNAME"));
                }
                if password.is_none() && password_hash.is_none() {
                    return Err(ConfigError::MissingVar("ADMIN_PASSWORD"));
                }
            }
            AdminAuthMode::Bearer => {
                if jwt_secret.is_none() {
                    return Err(ConfigError::MissingVar("JWT_SECRET"));
                }
            }
            AdminAuthMode::None => {}
        }

        Ok(AdminAuthConfig {
            mode,
            username,
            password,
            password_hash,
            jwt_secret,
        })
    }

    fn inbox_from<V>(var: &V) -> Result<InboxConfig, ConfigError>
    where
        V: Fn(&str) -> Option<String>,
    {
        let required_fields = match var("SUBMISSION_REQUIRED_FIELDS") {
            Some(s) => split_list(&s)
                .iter()
                .map(|name| {
                    ContactField::parse(name).ok_or_else(|| {
                        ConfigError::InvalidValue("SUBMISSION_REQUIRED_FIELDS", name.clone())
                    })
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let envelope = match var("RESPONSE_ENVELOPE").map(|s| s.to_lowercase()) {
            None => EnvelopeStyle::default(),
            Some(s) if s == "success" => EnvelopeStyle::Success,
            Some(s) if s == "ok" => EnvelopeStyle::Ok,
            Some(s) => return Err(ConfigError::InvalidValue("RESPONSE_ENVELOPE", s)),
        };

        let permanent_delete = match var("PERMANENT_DELETE_ENABLED") {
            Some(s) => parse_bool(&s)
                .ok_or(ConfigError::InvalidValue("PERMANENT_DELETE_ENABLED", s))?,
            None => true,
        };

        Ok(InboxConfig {
            required_fields,
            envelope,
            permanent_delete,
        })
    }
}

fn parse_or<V, T>(var: &V, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    V: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match var(key) {
        Some(s) => s
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, s)),
        None => Ok(default()),
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
        .collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
