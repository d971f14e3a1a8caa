//! Test helpers for integration tests
//!
//! Provides utilities for spawning test servers and making HTTP requests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Result;
use inbox_api::{create_app, create_app_state};
use inbox_common::AppConfig;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Admin username used by the default test configuration
pub const ADMIN_USERNAME: &str = "admin";
/// Admin password used by the default test configuration
pub const ADMIN_PASSWORD: &str = "secret";

/// Test server instance that manages lifecycle
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: Client,
    _handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a test server on the in-memory store with basic admin auth
    pub async fn start() -> Result<Self> {
        Self::start_with(&[]).await
    }

    /// Start a test server with extra configuration variables
    pub async fn start_with(overrides: &[(&str, &str)]) -> Result<Self> {
        Self::start_with_config(test_config(overrides)?).await
    }

    /// Start a test server with custom config
    pub async fn start_with_config(config: AppConfig) -> Result<Self> {
        // Create app state
        let state = create_app_state(config).await?;

        // Build application
        let app = create_app(state);

        // Bind to an ephemeral port
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = listener.local_addr()?;

        // Spawn server task
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        // Create HTTP client
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            addr,
            client,
            _handle: handle,
        })
    }

    /// Get base URL for the server
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    fn admin(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth(ADMIN_USERNAME, Some(ADMIN_PASSWORD))
    }

    /// Make an unauthenticated GET request
    pub async fn get(&self, path: &str) -> Result<Response> {
        Ok(self.client.get(self.url(path)).send().await?)
    }

    /// Make an unauthenticated POST request with JSON body
    pub async fn post<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self.client.post(self.url(path)).json(body).send().await?)
    }

    /// Make an admin GET request
    pub async fn get_admin(&self, path: &str) -> Result<Response> {
        Ok(self.admin(self.client.get(self.url(path))).send().await?)
    }

    /// Make an admin POST request without a body
    pub async fn post_admin(&self, path: &str) -> Result<Response> {
        Ok(self.admin(self.client.post(self.url(path))).send().await?)
    }

    /// Make an admin DELETE request without a body
    pub async fn delete_admin(&self, path: &str) -> Result<Response> {
        Ok(self.admin(self.client.delete(self.url(path))).send().await?)
    }

    /// Make an admin DELETE request with JSON body
    pub async fn delete_admin_with<T: Serialize>(&self, path: &str, body: &T) -> Result<Response> {
        Ok(self
            .admin(self.client.delete(self.url(path)))
            .json(body)
            .send()
            .await?)
    }
}

/// Create a test configuration
///
/// In-memory store, basic admin auth, plus `overrides`.
pub fn test_config(overrides: &[(&str, &str)]) -> Result<AppConfig> {
    let mut vars: HashMap<String, String> = [
        ("STORE_BACKEND", "memory"),
        ("ADMIN_AUTH_MODE", "basic"),
        ("ADMIN_USERNAME", ADMIN_USERNAME),
        ("ADMIN_PASSWORD", ADMIN_PASSWORD),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();

    for (key, value) in overrides {
        vars.insert((*key).to_string(), (*value).to_string());
    }

    AppConfig::from_lookup(|key| vars.get(key).cloned())
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))
}

/// Configuration backed by PostgreSQL, if DATABASE_URL is set
pub fn postgres_config() -> Option<Result<AppConfig>> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return None;
    };

    Some(test_config(&[("STORE_BACKEND", "postgres"), ("DATABASE_URL", &url)]))
}

/// Assert response status and parse JSON body
pub async fn assert_json<T: DeserializeOwned>(response: Response, expected_status: StatusCode) -> Result<T> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(response.json().await?)
}

/// Assert response status without parsing body
pub async fn assert_status(response: Response, expected_status: StatusCode) -> Result<()> {
    let status = response.status();
    if status != expected_status {
        let body = response.text().await?;
        anyhow::bail!(
            "Expected status {}, got {}. Body: {}",
            expected_status,
            status,
            body
        );
    }
    Ok(())
}
