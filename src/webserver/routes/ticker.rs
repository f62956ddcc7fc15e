use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::logger::LogTag;
use crate::webserver::state::AppState;
use crate::webserver::utils::{annotated_response, stats_error_response};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/mlb/ticker", get(get_ticker))
}

/// GET /api/mlb/ticker
async fn get_ticker(State(state): State<Arc<AppState>>) -> Response {
    match state.ticker.ticker().await {
        Ok(fetched) => annotated_response(fetched),
        Err(err) => stats_error_response(LogTag::Scoreboard, "ticker data", &err),
    }
}
