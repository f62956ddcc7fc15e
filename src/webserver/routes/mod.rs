use crate::webserver::state::AppState;
use axum::Router;
use std::sync::Arc;

pub mod advanced;
pub mod leaders;
pub mod players;
pub mod scoreboard;
pub mod status;
pub mod teams;
pub mod ticker;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new().nest("/api", api_routes()).with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(status::routes())
        .merge(scoreboard::routes())
        .merge(ticker::routes())
        .merge(players::routes())
        .merge(leaders::routes())
        .merge(teams::routes())
        .merge(advanced::routes())
}
