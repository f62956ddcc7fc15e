use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;

use crate::logger::LogTag;
use crate::webserver::state::AppState;
use crate::webserver::utils::{annotated_response, stats_error_response};

#[derive(Debug, Deserialize)]
pub struct ScoreboardParams {
    pub date: Option<String>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/mlb/scoreboard", get(get_scoreboard))
}

/// GET /api/mlb/scoreboard?date=YYYY-MM-DD
async fn get_scoreboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScoreboardParams>,
) -> Response {
    match state.scoreboard.scoreboard(params.date.as_deref()).await {
        Ok(fetched) => annotated_response(fetched),
        Err(err) => stats_error_response(LogTag::Scoreboard, "scoreboard data", &err),
    }
}
