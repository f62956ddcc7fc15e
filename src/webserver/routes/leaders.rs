use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;

use crate::leaders::LeadersRequest;
use crate::logger::LogTag;
use crate::webserver::state::AppState;
use crate::webserver::utils::{annotated_response, stats_error_response};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadersParams {
    pub stat_group: Option<String>,
    pub stat_type: Option<String>,
    pub season: Option<String>,
    pub limit: Option<String>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/mlb/leaders", get(get_leaders))
}

/// GET /api/mlb/leaders?statGroup=hitting&statType=season&limit=10
async fn get_leaders(State(state): State<Arc<AppState>>, Query(params): Query<LeadersParams>) -> Response {
    let request = match LeadersRequest::from_params(
        params.stat_group.as_deref(),
        params.stat_type.as_deref(),
        params.season.as_deref(),
        params.limit.as_deref(),
    ) {
        Ok(request) => request,
        Err(err) => return stats_error_response(LogTag::Leaders, "leaders data", &err),
    };

    match state.leaders.leaders(request).await {
        Ok(fetched) => annotated_response(fetched),
        Err(err) => stats_error_response(LogTag::Leaders, "leaders data", &err),
    }
}
