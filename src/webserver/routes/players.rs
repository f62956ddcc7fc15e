use axum::extract::{Path, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

use crate::logger::LogTag;
use crate::webserver::state::AppState;
use crate::webserver::utils::{annotated_response, stats_error_response};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/mlb/players/:playerId", get(get_player))
}

/// GET /api/mlb/players/:playerId
async fn get_player(State(state): State<Arc<AppState>>, Path(player_id): Path<String>) -> Response {
    match state.players.player(&player_id).await {
        Ok(fetched) => annotated_response(fetched),
        Err(err) => stats_error_response(LogTag::Players, "player data", &err),
    }
}
