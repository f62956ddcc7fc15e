/// Response helpers shared by all route handlers
///
/// Success bodies are the projected payload flattened together with cache
/// annotations (`cached` always, `stale`/`mock` only when set). Error bodies
/// are `{ "error": message }`; validation messages pass through, everything
/// else is replaced with a generic message and logged here.
use crate::cache::Fetched;
use crate::errors::StatsError;
use crate::logger::{self, LogTag};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;

/// Payload plus cache annotations, flattened into one JSON object
#[derive(Serialize)]
struct Envelope<T: Serialize> {
    #[serde(flatten)]
    data: T,
    cached: bool,
    #[serde(skip_serializing_if = "is_false")]
    stale: bool,
    #[serde(skip_serializing_if = "is_false")]
    mock: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

/// 200 with the annotated payload
pub fn annotated_response<T: Serialize>(fetched: Fetched<T>) -> Response {
    let envelope = Envelope {
        data: fetched.value,
        cached: fetched.cached,
        stale: fetched.stale,
        mock: fetched.mock,
    };
    (StatusCode::OK, Json(envelope)).into_response()
}

/// 200 with a bare payload (health/status endpoints)
pub fn success_response<T: Serialize>(payload: T) -> Response {
    (StatusCode::OK, Json(payload)).into_response()
}

/// Error JSON with the given status
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Map an adapter failure to a client response. Validation errors surface
/// their message; anything else is logged with detail and returned generic.
pub fn stats_error_response(tag: LogTag, context: &str, err: &StatsError) -> Response {
    match err {
        StatsError::Validation { .. } => error_response(StatusCode::BAD_REQUEST, &err.to_string()),
        _ => {
            logger::error(tag, &format!("Failed to serve {}: {}", context, err));
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Failed to fetch {}", context),
            )
        }
    }
}
