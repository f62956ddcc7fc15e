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
#[serde(rename_all = "camelCase")]
pub struct TeamsParams {
    pub team_id: Option<String>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/mlb/teams", get(get_teams))
}

/// GET /api/mlb/teams?teamId=147
async fn get_teams(State(state): State<Arc<AppState>>, Query(params): Query<TeamsParams>) -> Response {
    match state.teams.teams(params.team_id.as_deref()).await {
        Ok(fetched) => annotated_response(fetched),
        Err(err) => stats_error_response(LogTag::Teams, "team data", &err),
    }
}
