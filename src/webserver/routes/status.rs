use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::CacheMetrics;
use crate::webserver::state::AppState;
use crate::webserver::utils::success_response;

/// Simple health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

/// Process status with per-adapter cache counters
#[derive(Debug, Clone, Serialize)]
pub struct StatusSnapshot {
    pub uptime_seconds: u64,
    pub caches: HashMap<&'static str, CacheMetrics>,
}

/// Create status routes
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/status", get(system_status))
}

/// GET /api/health
async fn health_check() -> Response {
    success_response(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/status
async fn system_status(State(state): State<Arc<AppState>>) -> Response {
    success_response(StatusSnapshot {
        uptime_seconds: state.uptime_seconds(),
        caches: state.cache_report(),
    })
}
