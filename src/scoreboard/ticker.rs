/// Lightweight scoreboard ticker
///
/// Same upstream call as the scoreboard but with minimal hydration, projected
/// down to the handful of fields the scrolling ticker needs. Polled far more
/// often than the full scoreboard, so payload size matters more than detail.
use crate::apis::statsapi::{Game, ScheduleResponse, StatsApiClient};
use crate::cache::{CacheMetrics, FetchCache, Fetched};
use crate::constants;
use crate::errors::StatsResult;
use crate::scoreboard::resolve_date;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerPayload {
    pub games: Vec<TickerGame>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerGame {
    pub game_pk: i64,
    pub state: String,
    pub away: TickerSide,
    pub home: TickerSide,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inning: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inning_half: Option<String>,
    pub game_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerSide {
    pub id: i64,
    pub name: String,
    pub abbreviation: String,
    pub score: Option<u32>,
}

pub struct TickerAdapter {
    client: Arc<StatsApiClient>,
    cache: FetchCache<TickerPayload>,
    ttl: Duration,
}

impl TickerAdapter {
    pub fn new(client: Arc<StatsApiClient>, ttl: Duration) -> Self {
        Self {
            client,
            cache: FetchCache::new("ticker"),
            ttl,
        }
    }

    /// Today's games in reduced form
    pub async fn ticker(&self) -> StatsResult<Fetched<TickerPayload>> {
        let date = resolve_date(None)?;
        let upstream_date = date.format("%m/%d/%Y").to_string();
        // Keyed by date so entries roll over naturally at midnight
        let key = format!("ticker:{}", date.format("%Y-%m-%d"));

        let client = Arc::clone(&self.client);
        self.cache
            .get_or_fetch(&key, self.ttl, || async move {
                let raw = client.schedule(&upstream_date, constants::HYDRATE_TICKER).await?;
                Ok(project_ticker(raw))
            })
            .await
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.cache.metrics()
    }
}

pub fn project_ticker(raw: ScheduleResponse) -> TickerPayload {
    let games = raw
        .dates
        .into_iter()
        .flat_map(|d| d.games)
        .map(reduce_game)
        .collect();

    TickerPayload {
        games,
        timestamp: Utc::now(),
    }
}

fn reduce_game(game: Game) -> TickerGame {
    let linescore = game.linescore.as_ref();
    TickerGame {
        game_pk: game.game_pk,
        state: game
            .status
            .abstract_game_state
            .unwrap_or_else(|| "Unknown".to_string()),
        away: reduce_side(&game.teams.away),
        home: reduce_side(&game.teams.home),
        inning: linescore.and_then(|ls| ls.current_inning),
        inning_half: linescore.and_then(|ls| ls.inning_half.clone()),
        game_date: game.game_date,
    }
}

fn reduce_side(side: &crate::apis::statsapi::GameSide) -> TickerSide {
    TickerSide {
        id: side.team.id,
        name: side.team.name.clone().unwrap_or_default(),
        abbreviation: side.team.abbreviation_or_derived(),
        score: side.score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn projection_keeps_only_ticker_fields() {
        let raw: ScheduleResponse = serde_json::from_value(json!({
            "dates": [{
                "games": [{
                    "gamePk": 10,
                    "gameDate": "2024-07-04T20:10:00Z",
                    "status": { "abstractGameState": "Live" },
                    "teams": {
                        "away": { "score": 3, "team": { "id": 1, "name": "New York Mets", "teamName": "Mets" } },
                        "home": { "score": 1, "team": { "id": 2, "name": "Atlanta Braves", "abbreviation": "ATL" } }
                    },
                    "linescore": { "currentInning": 6, "inningHalf": "Top" }
                }]
            }]
        }))
        .unwrap();

        let payload = project_ticker(raw);
        assert_eq!(payload.games.len(), 1);

        let game = &payload.games[0];
        assert_eq!(game.inning, Some(6));
        assert_eq!(game.inning_half.as_deref(), Some("Top"));
        // Missing abbreviation falls back to the club name prefix
        assert_eq!(game.away.abbreviation, "MET");
        assert_eq!(game.home.abbreviation, "ATL");
        assert_eq!(game.away.score, Some(3));
    }
}
