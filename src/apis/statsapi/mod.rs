/// MLB Stats API client
///
/// Thin typed wrapper over the public stats REST API. All endpoints follow
/// the same shape: GET with query parameters, JSON body, non-2xx means
/// failure. Raw error bodies are logged here and never surfaced to callers.
///
/// Endpoints used:
/// 1. /schedule                - games for a date (scoreboard + ticker)
/// 2. /people/{personId}       - player bio with hydrated stat blocks
/// 3. /stats/leaders           - leader lists per category
/// 4. /teams                   - team directory with logos
pub mod types;

pub use self::types::{
    Game, GameSide, GameStatus, GameTeams, LeaderCategory, LeaderEntry, LeadersResponse, Linescore,
    Person, PersonRef, PersonResponse, ScheduleDate, ScheduleResponse, StatBlock, StatSplit, TeamLogo,
    TeamRef, TeamsResponse, UpstreamTeam,
};

use crate::apis::client::{HttpClient, RateLimiter};
use crate::config::UpstreamConfig;
use crate::constants;
use crate::errors::{StatsError, StatsResult};
use crate::logger::{self, LogTag};
use serde::de::DeserializeOwned;
use url::Url;

pub struct StatsApiClient {
    http: HttpClient,
    base_url: String,
    limiter: RateLimiter,
}

impl StatsApiClient {
    pub fn new(config: &UpstreamConfig) -> StatsResult<Self> {
        Url::parse(&config.base_url)
            .map_err(|e| StatsError::Config(format!("Invalid upstream base URL '{}': {}", config.base_url, e)))?;

        Ok(Self {
            http: HttpClient::new(config.timeout_secs)?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limiter: RateLimiter::new(config.max_concurrent, config.rate_limit_per_minute),
        })
    }

    /// Schedule for one date (MM/DD/YYYY), with caller-selected hydration
    pub async fn schedule(&self, date: &str, hydrate: &str) -> StatsResult<ScheduleResponse> {
        self.get_json(
            "/schedule",
            &[
                ("sportId", constants::SPORT_ID.to_string()),
                ("date", date.to_string()),
                ("hydrate", hydrate.to_string()),
            ],
        )
        .await
    }

    /// Player bio with hydrated season and career stat blocks
    pub async fn person(&self, player_id: i64) -> StatsResult<PersonResponse> {
        self.get_json(
            &format!("/people/{}", player_id),
            &[("hydrate", constants::HYDRATE_PLAYER.to_string())],
        )
        .await
    }

    /// Leader lists for a comma-separated set of categories
    pub async fn stat_leaders(
        &self,
        categories: &str,
        stat_group: &str,
        stat_type: &str,
        season: &str,
        limit: u32,
    ) -> StatsResult<LeadersResponse> {
        self.get_json(
            "/stats/leaders",
            &[
                ("leaderCategories", categories.to_string()),
                ("statGroup", stat_group.to_string()),
                ("statType", stat_type.to_string()),
                ("season", season.to_string()),
                ("limit", limit.to_string()),
                ("sportId", constants::SPORT_ID.to_string()),
            ],
        )
        .await
    }

    /// Team directory, optionally filtered to one team
    pub async fn teams(&self, team_id: Option<i64>) -> StatsResult<TeamsResponse> {
        let mut params = vec![
            ("sportId", constants::SPORT_ID.to_string()),
            ("hydrate", constants::HYDRATE_TEAMS.to_string()),
        ];
        if let Some(id) = team_id {
            params.push(("teamId", id.to_string()));
        }
        self.get_json("/teams", &params).await
    }

    async fn get_json<T>(&self, endpoint: &str, params: &[(&str, String)]) -> StatsResult<T>
    where
        T: DeserializeOwned,
    {
        let _guard = self.limiter.acquire().await?;

        let url = format!("{}{}", self.base_url, endpoint);
        logger::debug(LogTag::Api, &format!("GET {}", url));

        let response = self
            .http
            .client()
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| StatsError::upstream(endpoint, None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            logger::error(
                LogTag::Api,
                &format!("HTTP {} from {}: {}", status, endpoint, body.chars().take(300).collect::<String>()),
            );
            return Err(StatsError::upstream(
                endpoint,
                Some(status.as_u16()),
                format!("HTTP {}", status),
            ));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StatsError::Parse(format!("{}: {}", endpoint, e)))
    }
}
