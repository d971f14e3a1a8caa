//! Contact inbox API server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p inbox-api
//! ```
//!
//! Configuration is loaded from environment variables or a `.env` file.

use inbox_common::{try_init_tracing_with_config, AppConfig, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Load configuration first so the log format follows APP_ENV
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {}", e);
    }

    info!(
        env = ?config.app.env,
        address = %config.api.address(),
        store = ?config.store.backend,
        "Starting contact inbox API server..."
    );

    if let Err(e) = inbox_api::run(config).await {
        error!(error = %e, "Server failed to start");
        std::process::exit(1);
    }
}
