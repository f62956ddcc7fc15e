/// Axum webserver implementation
///
/// Main server lifecycle management including startup, shutdown, and graceful
/// termination
use axum::Router;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::errors::{StatsError, StatsResult};
use crate::logger::{self, LogTag};
use crate::webserver::{routes, state::AppState};

/// Global shutdown notifier
static SHUTDOWN_NOTIFY: once_cell::sync::Lazy<Arc<Notify>> =
    once_cell::sync::Lazy::new(|| Arc::new(Notify::new()));

/// Start the webserver
///
/// This function blocks until the server is shut down
pub async fn start_server(state: Arc<AppState>) -> StatsResult<()> {
    let host = state.config.server.host.clone();
    let port = state.config.server.port;

    let app = build_app(state);

    let addr: SocketAddr = format!("{}:{}", host, port)
        .parse()
        .map_err(|e| StatsError::Config(format!("Invalid bind address {}:{}: {}", host, port, e)))?;

    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|e| StatsError::Config(format!("Failed to bind to {}: {}", addr, e)))?;

    logger::info(LogTag::Webserver, &format!("Listening on http://{}", addr));
    logger::debug(
        LogTag::Webserver,
        &format!("API endpoints available at http://{}/api", addr),
    );

    // Run the server with graceful shutdown
    let shutdown_signal = async {
        SHUTDOWN_NOTIFY.notified().await;
        logger::debug(LogTag::Webserver, "Received shutdown signal, stopping webserver...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
        .map_err(|e| StatsError::Internal(format!("Server error: {}", e)))?;

    logger::info(LogTag::Webserver, "Webserver stopped gracefully");

    Ok(())
}

/// Trigger webserver shutdown
pub fn shutdown() {
    SHUTDOWN_NOTIFY.notify_one();
}

/// Build the Axum application with all routes and middleware
fn build_app(state: Arc<AppState>) -> Router {
    routes::create_router(state)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
