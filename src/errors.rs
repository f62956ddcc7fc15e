/// Structured error handling for the stats proxy
///
/// Three failure classes matter to callers: bad request parameters (never
/// touch the cache, 400), upstream fetch failures (recoverable through stale
/// cache or a configured fallback dataset), and everything else (500).
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Invalid parameter '{field}': {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Upstream request to {endpoint} failed: {detail}")]
    Upstream {
        endpoint: String,
        status: Option<u16>,
        detail: String,
    },

    #[error("Failed to parse upstream payload: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl StatsError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        StatsError::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn upstream(endpoint: impl Into<String>, status: Option<u16>, detail: impl Into<String>) -> Self {
        StatsError::Upstream {
            endpoint: endpoint.into(),
            status,
            detail: detail.into(),
        }
    }

    /// Whether a stale cache entry or fallback dataset may stand in for this
    /// failure. Validation and config errors must always surface as-is.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StatsError::Upstream { .. } | StatsError::Parse(_))
    }

    /// HTTP status code this error maps to at the handler boundary
    pub fn status_code(&self) -> u16 {
        match self {
            StatsError::Validation { .. } => 400,
            _ => 500,
        }
    }
}

impl From<reqwest::Error> for StatsError {
    fn from(err: reqwest::Error) -> Self {
        let endpoint = err
            .url()
            .map(|u| u.path().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        let status = err.status().map(|s| s.as_u16());
        StatsError::Upstream {
            endpoint,
            status,
            detail: err.to_string(),
        }
    }
}

pub type StatsResult<T> = Result<T, StatsError>;
