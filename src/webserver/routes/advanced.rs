use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;

use crate::logger::LogTag;
use crate::webserver::state::AppState;
use crate::webserver::utils::{annotated_response, stats_error_response};

#[derive(Debug, Deserialize)]
pub struct AdvancedParams {
    pub season: Option<String>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/advanced-stats/:type", get(get_advanced_stats))
}

/// GET /api/advanced-stats/:type?season=2024
async fn get_advanced_stats(
    State(state): State<Arc<AppState>>,
    Path(stats_type): Path<String>,
    Query(params): Query<AdvancedParams>,
) -> Response {
    match state.advanced.table(&stats_type, params.season.as_deref()).await {
        Ok(fetched) => annotated_response(fetched),
        Err(err) => stats_error_response(LogTag::Advanced, "advanced statistics", &err),
    }
}
