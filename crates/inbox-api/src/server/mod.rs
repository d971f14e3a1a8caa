//! Server setup and initialization
//!
//! Provides the main application builder and server runner.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use inbox_common::{build_verifier, AppConfig, AppError, StoreBackend};
use inbox_core::MessageRepository;
use inbox_db::{create_pool, run_migrations, InMemoryMessageRepository, PgMessageRepository, PoolConfig};
use inbox_service::{ServiceContextBuilder, SubmissionSchema};
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::middleware::apply_middleware;
use crate::routes::{create_router, health_routes};
use crate::state::AppState;

/// Build the complete Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let config = state.config();
    let router = create_router(&config.inbox).merge(health_routes());
    let router = apply_middleware(router, &config.cors, config.app.env.is_production());
    router.with_state(state)
}

/// Open the configured message store
async fn create_message_repo(config: &AppConfig) -> Result<Arc<dyn MessageRepository>, AppError> {
    match config.store.backend {
        StoreBackend::Postgres => {
            let db = config
                .store
                .database
                .as_ref()
                .ok_or_else(|| AppError::Config("DATABASE_URL is required for the postgres store".to_string()))?;

            info!("Connecting to PostgreSQL...");
            let pool = create_pool(&PoolConfig::from(db))
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
            info!("PostgreSQL connection established");

            run_migrations(&pool)
                .await
                .map_err(|e| AppError::Database(format!("Migration failed: {}", e)))?;
            info!("Database migrations applied");

            Ok(Arc::new(PgMessageRepository::new(pool)))
        }
        StoreBackend::Memory => {
            warn!("Using in-memory message store; messages are lost on restart");
            Ok(Arc::new(InMemoryMessageRepository::new()))
        }
    }
}

/// Initialize all dependencies and create AppState
pub async fn create_app_state(config: AppConfig) -> Result<AppState, AppError> {
    let message_repo = create_message_repo(&config).await?;

    let verifier = build_verifier(&config.admin)?;
    info!(mode = ?config.admin.mode, "Admin authentication configured");

    let schema = SubmissionSchema::new(config.inbox.required_fields.iter().copied());

    let service_context = ServiceContextBuilder::new()
        .message_repo(message_repo)
        .verifier(verifier)
        .schema(schema)
        .build()
        .map_err(|e| AppError::Config(e.to_string()))?;

    Ok(AppState::new(service_context, config))
}

/// Run the HTTP server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    info!("Starting HTTP server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("Server error: {}", e)))?;

    Ok(())
}

/// Run the complete server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr: SocketAddr = config
        .api
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid listen address {}: {}", config.api.address(), e)))?;

    // Create app state
    let state = create_app_state(config).await?;

    // Build application
    let app = create_app(state);

    // Run server
    run_server(app, addr).await
}
