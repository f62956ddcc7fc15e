/// Scoreboard adapter
///
/// Fetches the schedule for one date and reshapes it for the scoreboard
/// view: per-game derived state flags, winner/loser for finished games, a
/// human-readable inning display, and id partitions by game state.
pub mod mock;
pub mod ticker;

use crate::apis::statsapi::{Game, ScheduleResponse, StatsApiClient};
use crate::cache::{CacheMetrics, FetchCache, Fetched, MockProvider};
use crate::constants;
use crate::errors::{StatsError, StatsResult};
use crate::logger::{self, LogTag};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

/// Game states used by the upstream abstractGameState field
pub const STATE_LIVE: &str = "Live";
pub const STATE_FINAL: &str = "Final";
pub const STATE_PREVIEW: &str = "Preview";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardPayload {
    pub date: String,
    pub games: Vec<GameSummary>,
    pub live_games: Vec<i64>,
    pub upcoming_games: Vec<i64>,
    pub completed_games: Vec<i64>,
    pub total_games: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub game_pk: i64,
    pub game_date: Option<DateTime<Utc>>,
    pub state: String,
    pub is_live: bool,
    pub is_final: bool,
    pub is_preview: bool,
    pub away: SideSummary,
    pub home: SideSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winning_side: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub losing_side: Option<String>,
    pub inning_display: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SideSummary {
    pub team_id: i64,
    pub name: String,
    pub abbreviation: String,
    pub score: Option<u32>,
}

pub struct ScoreboardAdapter {
    client: Arc<StatsApiClient>,
    cache: FetchCache<ScoreboardPayload>,
    ttl: Duration,
    mock: Option<Arc<dyn MockProvider<ScoreboardPayload>>>,
}

impl ScoreboardAdapter {
    pub fn new(client: Arc<StatsApiClient>, ttl: Duration) -> Self {
        Self {
            client,
            cache: FetchCache::new("scoreboard"),
            ttl,
            mock: None,
        }
    }

    /// Attach a fallback dataset provider for total upstream outages
    pub fn with_mock(mut self, provider: Arc<dyn MockProvider<ScoreboardPayload>>) -> Self {
        self.mock = Some(provider);
        self
    }

    /// Scoreboard for a date (ISO `YYYY-MM-DD`), defaulting to today
    pub async fn scoreboard(&self, date: Option<&str>) -> StatsResult<Fetched<ScoreboardPayload>> {
        let date = resolve_date(date)?;
        let date_iso = date.format("%Y-%m-%d").to_string();
        let upstream_date = date.format("%m/%d/%Y").to_string();
        let key = format!("scoreboard:{}", date_iso);

        let client = Arc::clone(&self.client);
        let iso = date_iso.clone();
        let result = self
            .cache
            .get_or_fetch(&key, self.ttl, || async move {
                let raw = client.schedule(&upstream_date, constants::HYDRATE_SCOREBOARD).await?;
                Ok(project_scoreboard(&iso, raw))
            })
            .await;

        match result {
            Err(err) if err.is_recoverable() => match &self.mock {
                Some(provider) => {
                    logger::warning(
                        LogTag::Scoreboard,
                        &format!("No cache for {}, serving generated fallback ({})", date_iso, err),
                    );
                    Ok(Fetched::mock(provider.mock()))
                }
                None => Err(err),
            },
            other => other,
        }
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.cache.metrics()
    }
}

/// Parse an optional ISO date parameter, defaulting to the current day
pub(crate) fn resolve_date(date: Option<&str>) -> StatsResult<NaiveDate> {
    match date {
        None => Ok(Utc::now().date_naive()),
        Some(raw) if raw.is_empty() => Ok(Utc::now().date_naive()),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|_| StatsError::validation("date", format!("expected YYYY-MM-DD, got '{}'", raw))),
    }
}

/// Reshape the raw schedule into the scoreboard payload. One pass produces
/// both the game summaries and the state partitions, so a cache hit always
/// returns a self-consistent bundle.
pub fn project_scoreboard(date_iso: &str, raw: ScheduleResponse) -> ScoreboardPayload {
    let games: Vec<GameSummary> = raw
        .dates
        .into_iter()
        .flat_map(|d| d.games)
        .map(summarize_game)
        .collect();

    let (live_games, upcoming_games, completed_games) = partition_by_state(&games);
    let total_games = games.len();

    ScoreboardPayload {
        date: date_iso.to_string(),
        games,
        live_games,
        upcoming_games,
        completed_games,
        total_games,
        timestamp: Utc::now(),
    }
}

/// Split game ids into live / upcoming / completed lists
pub(crate) fn partition_by_state(games: &[GameSummary]) -> (Vec<i64>, Vec<i64>, Vec<i64>) {
    let mut live = Vec::new();
    let mut upcoming = Vec::new();
    let mut completed = Vec::new();
    for game in games {
        if game.is_live {
            live.push(game.game_pk);
        } else if game.is_final {
            completed.push(game.game_pk);
        } else {
            upcoming.push(game.game_pk);
        }
    }
    (live, upcoming, completed)
}

fn summarize_game(game: Game) -> GameSummary {
    let state = game
        .status
        .abstract_game_state
        .unwrap_or_else(|| "Unknown".to_string());
    let is_live = state == STATE_LIVE;
    let is_final = state == STATE_FINAL;
    let is_preview = state == STATE_PREVIEW;

    let away = summarize_side(&game.teams.away);
    let home = summarize_side(&game.teams.home);

    let (winning_side, losing_side) = if is_final {
        winner_by_score(away.score, home.score)
    } else {
        (None, None)
    };

    let inning_display = inning_display(&state, game.linescore.as_ref(), game.game_date.as_ref());

    GameSummary {
        game_pk: game.game_pk,
        game_date: game.game_date,
        state,
        is_live,
        is_final,
        is_preview,
        away,
        home,
        winning_side,
        losing_side,
        inning_display,
    }
}

fn summarize_side(side: &crate::apis::statsapi::GameSide) -> SideSummary {
    SideSummary {
        team_id: side.team.id,
        name: side.team.name.clone().unwrap_or_default(),
        abbreviation: side.team.abbreviation_or_derived(),
        score: side.score,
    }
}

/// Winner by final score; a tie or missing score yields no winner
fn winner_by_score(away: Option<u32>, home: Option<u32>) -> (Option<String>, Option<String>) {
    match (away, home) {
        (Some(a), Some(h)) if a > h => (Some("away".to_string()), Some("home".to_string())),
        (Some(a), Some(h)) if h > a => (Some("home".to_string()), Some("away".to_string())),
        _ => (None, None),
    }
}

fn inning_display(
    state: &str,
    linescore: Option<&crate::apis::statsapi::Linescore>,
    game_date: Option<&DateTime<Utc>>,
) -> String {
    match state {
        STATE_FINAL => "Final".to_string(),
        STATE_LIVE => match linescore {
            Some(ls) => match (&ls.inning_half, ls.current_inning) {
                (Some(half), Some(inning)) => format!("{} {}", half, inning),
                (None, Some(inning)) => format!("Inning {}", inning),
                _ => "Live".to_string(),
            },
            None => "Live".to_string(),
        },
        _ => match game_date {
            Some(dt) => dt.format("%H:%M UTC").to_string(),
            None => "TBD".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> ScheduleResponse {
        // Three games on 2024-07-04: one final (away 5, home 3), one live in
        // the bottom of the 4th, one not started yet.
        serde_json::from_value(json!({
            "totalGames": 3,
            "dates": [{
                "date": "2024-07-04",
                "games": [
                    {
                        "gamePk": 1,
                        "gameDate": "2024-07-04T17:05:00Z",
                        "status": { "abstractGameState": "Final", "detailedState": "Final" },
                        "teams": {
                            "away": { "score": 5, "team": { "id": 147, "name": "New York Yankees", "abbreviation": "NYY" } },
                            "home": { "score": 3, "team": { "id": 111, "name": "Boston Red Sox", "abbreviation": "BOS" } }
                        },
                        "linescore": { "currentInning": 9, "inningHalf": "Bottom" }
                    },
                    {
                        "gamePk": 2,
                        "gameDate": "2024-07-04T20:10:00Z",
                        "status": { "abstractGameState": "Live", "detailedState": "In Progress" },
                        "teams": {
                            "away": { "score": 2, "team": { "id": 119, "name": "Los Angeles Dodgers", "abbreviation": "LAD" } },
                            "home": { "score": 2, "team": { "id": 137, "name": "San Francisco Giants", "abbreviation": "SF" } }
                        },
                        "linescore": { "currentInning": 4, "inningHalf": "Bottom" }
                    },
                    {
                        "gamePk": 3,
                        "gameDate": "2024-07-05T01:05:00Z",
                        "status": { "abstractGameState": "Preview", "detailedState": "Scheduled" },
                        "teams": {
                            "away": { "team": { "id": 136, "name": "Seattle Mariners", "abbreviation": "SEA" } },
                            "home": { "team": { "id": 108, "name": "Los Angeles Angels", "abbreviation": "LAA" } }
                        }
                    }
                ]
            }]
        }))
        .unwrap()
    }

    #[test]
    fn projection_partitions_and_derives_winner() {
        let payload = project_scoreboard("2024-07-04", fixture());

        assert_eq!(payload.total_games, 3);
        assert_eq!(payload.live_games, vec![2]);
        assert_eq!(payload.completed_games, vec![1]);
        assert_eq!(payload.upcoming_games, vec![3]);

        let final_game = &payload.games[0];
        assert!(final_game.is_final && !final_game.is_live && !final_game.is_preview);
        assert_eq!(final_game.winning_side.as_deref(), Some("away"));
        assert_eq!(final_game.losing_side.as_deref(), Some("home"));
        assert_eq!(final_game.inning_display, "Final");

        let live_game = &payload.games[1];
        assert!(live_game.is_live);
        assert_eq!(live_game.winning_side, None);
        assert_eq!(live_game.inning_display, "Bottom 4");

        let upcoming = &payload.games[2];
        assert!(upcoming.is_preview);
        assert_eq!(upcoming.inning_display, "01:05 UTC");
        assert_eq!(upcoming.away.abbreviation, "SEA");
    }

    #[test]
    fn tied_final_has_no_winner() {
        let (winner, loser) = winner_by_score(Some(4), Some(4));
        assert_eq!(winner, None);
        assert_eq!(loser, None);

        let (winner, loser) = winner_by_score(None, Some(4));
        assert_eq!(winner, None);
        assert_eq!(loser, None);
    }

    #[test]
    fn date_parameter_validation() {
        assert!(resolve_date(Some("2024-07-04")).is_ok());
        assert!(resolve_date(None).is_ok());
        assert!(resolve_date(Some("")).is_ok());

        let err = resolve_date(Some("07/04/2024")).unwrap_err();
        assert!(matches!(err, StatsError::Validation { field: "date", .. }));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn serialized_payload_uses_camel_case() {
        let payload = project_scoreboard("2024-07-04", fixture());
        let value = serde_json::to_value(&payload).unwrap();

        assert!(value.get("liveGames").is_some());
        assert!(value.get("completedGames").is_some());
        assert_eq!(value["games"][0]["winningSide"], "away");
        // Absent winner is omitted entirely, not serialized as null
        assert!(value["games"][1].get("winningSide").is_none());
    }
}
