//! Axum server setup
//!
//! Server skeleton with:
//! - Permissive CORS by default (any origin may call the API)
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::ListingsStore;

/// Default listening port
pub const DEFAULT_PORT: u16 = 8080;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:8080)
    pub bind_addr: SocketAddr,

    /// Allow cross-origin requests from any origin (default: true)
    pub cors_permissive: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT)),
            cors_permissive: true,
        }
    }
}

/// Shared application state
pub struct AppState {
    pub store: Box<dyn ListingsStore>,
}

impl AppState {
    pub fn new(store: impl ListingsStore) -> Self {
        Self {
            store: Box::new(store),
        }
    }
}

/// Build the application router around an initialized store.
pub fn build_router(state: AppState, config: &ServerConfig) -> Router {
    let cors = config.cors_permissive.then(CorsLayer::permissive);
    if cors.is_none() {
        tracing::info!("CORS disabled - same-origin requests only");
    }

    let middleware = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .option_layer(cors);

    Router::new()
        .merge(routes::status::router())
        .merge(routes::listings::router())
        .layer(middleware)
        .with_state(Arc::new(state))
}

/// Run the HTTP server until a shutdown signal arrives.
///
/// The store must already be initialized; nothing is served if that failed.
///
/// # Example
///
/// ```ignore
/// let store = PgListings::initialize(&database_url).await?;
/// run_server(store, ServerConfig::default()).await?;
/// ```
pub async fn run_server(store: impl ListingsStore, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(AppState::new(store), &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
