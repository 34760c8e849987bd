//! # CornerStore API
//!
//! REST server for the CornerStore store-management system.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         API Server                                      │
//! │                                                                         │
//! │  Client ───► HTTP/JSON (8080) ───► Handlers ───► Repositories ───►    │
//! │                                        │              SQLite            │
//! │                                        ▼                                │
//! │                                   store-core                            │
//! │                                 (pricing, validation)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use crate::config::ApiConfig;
use store_db::{Database, DbConfig};

/// Shared application state.
pub struct AppState {
    pub db: Database,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .init();

    info!("Starting CornerStore API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        port = config.http_port,
        db_path = %config.database_path,
        "Configuration loaded"
    );

    // Connect to database (runs migrations on connect)
    if let Some(parent) = std::path::Path::new(&config.database_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let db_config =
        DbConfig::new(&config.database_path).max_connections(config.db_max_connections);
    let db = Database::new(db_config).await?;
    info!("Connected to SQLite");

    // Create shared state
    let state = Arc::new(AppState { db });

    // Build router
    let app = routes::router(state);

    // Build server address
    let addr: SocketAddr = format!("0.0.0.0:{}", config.http_port).parse()?;
    info!(%addr, "Starting HTTP server");

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
