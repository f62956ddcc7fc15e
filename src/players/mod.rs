/// Player detail adapter
///
/// Fetches a player bio with hydrated stat blocks and derives two secondary
/// views: career aggregates (hitting and pitching, located by stat group and
/// type labels inside the hydrated collection) and current-season rate
/// metrics. Derived fields are computed in the same pass as the projection
/// and cached with it, so a cache hit always returns a consistent bundle.
pub mod sabermetrics;

use crate::apis::statsapi::{Person, StatSplit, StatsApiClient};
use crate::cache::{CacheMetrics, FetchCache, Fetched};
use crate::errors::{StatsError, StatsResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPayload {
    pub player: PlayerBio,
    pub career_stats: CareerStats,
    pub season_metrics: SeasonMetrics,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerBio {
    pub id: i64,
    pub full_name: Option<String>,
    pub primary_number: Option<String>,
    pub birth_date: Option<String>,
    pub current_age: Option<u32>,
    pub position: Option<String>,
    pub bats: Option<String>,
    pub throws: Option<String>,
    pub team: Option<BioTeam>,
    pub mlb_debut_date: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BioTeam {
    pub id: i64,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hitting: Option<CareerHitting>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitching: Option<CareerPitching>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerHitting {
    pub games_played: Option<i64>,
    pub avg: Option<String>,
    pub home_runs: Option<i64>,
    pub rbi: Option<i64>,
    pub hits: Option<i64>,
    pub obp: Option<String>,
    pub slg: Option<String>,
    pub ops: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPitching {
    pub games_played: Option<i64>,
    pub wins: Option<i64>,
    pub losses: Option<i64>,
    pub era: Option<String>,
    pub strikeouts: Option<i64>,
    pub whip: Option<String>,
    pub innings_pitched: Option<String>,
}

/// Current-season derived rates. A `null` rate means the underlying
/// denominator was absent or zero, not that the rate is zero.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonMetrics {
    pub season: Option<String>,
    pub ops: Option<f64>,
    pub iso: Option<f64>,
    pub whip: Option<f64>,
    pub strikeouts_per_nine: Option<f64>,
}

pub struct PlayerAdapter {
    client: Arc<StatsApiClient>,
    cache: FetchCache<PlayerPayload>,
    ttl: Duration,
}

impl PlayerAdapter {
    pub fn new(client: Arc<StatsApiClient>, ttl: Duration) -> Self {
        Self {
            client,
            cache: FetchCache::new("players"),
            ttl,
        }
    }

    /// Player detail by id. The id arrives as an opaque path segment and is
    /// validated before any cache or upstream work happens.
    pub async fn player(&self, player_id: &str) -> StatsResult<Fetched<PlayerPayload>> {
        let id = validate_player_id(player_id)?;
        let key = format!("player:{}", id);

        let client = Arc::clone(&self.client);
        self.cache
            .get_or_fetch(&key, self.ttl, || async move {
                let raw = client.person(id).await?;
                let person = raw
                    .people
                    .into_iter()
                    .next()
                    .ok_or_else(|| StatsError::Parse(format!("empty people response for id {}", id)))?;
                Ok(project_player(person))
            })
            .await
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.cache.metrics()
    }
}

fn validate_player_id(raw: &str) -> StatsResult<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(StatsError::validation("playerId", "player id is required"));
    }
    match trimmed.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(StatsError::validation(
            "playerId",
            format!("expected a positive integer, got '{}'", raw),
        )),
    }
}

pub fn project_player(person: Person) -> PlayerPayload {
    let career_stats = CareerStats {
        hitting: find_split(&person, "hitting", "career").map(career_hitting),
        pitching: find_split(&person, "pitching", "career").map(career_pitching),
    };
    let season_metrics = derive_season_metrics(&person);

    let player = PlayerBio {
        id: person.id,
        full_name: person.full_name,
        primary_number: person.primary_number,
        birth_date: person.birth_date,
        current_age: person.current_age,
        position: person
            .primary_position
            .and_then(|p| p.abbreviation.or(p.name)),
        bats: person.bat_side.and_then(|b| b.description.or(b.code)),
        throws: person.pitch_hand.and_then(|p| p.description.or(p.code)),
        team: person.current_team.map(|t| BioTeam {
            id: t.id,
            name: t.name,
        }),
        mlb_debut_date: person.mlb_debut_date,
        active: person.active,
    };

    PlayerPayload {
        player,
        career_stats,
        season_metrics,
        timestamp: Utc::now(),
    }
}

/// Locate a stat split by group and type display names. Season blocks carry
/// one split per year; the last one is the most recent.
fn find_split<'a>(person: &'a Person, group: &str, stat_type: &str) -> Option<&'a StatSplit> {
    person
        .stats
        .iter()
        .find(|block| {
            let group_matches = block
                .group
                .as_ref()
                .and_then(|g| g.display_name.as_deref())
                .map(|name| name.eq_ignore_ascii_case(group))
                .unwrap_or(false);
            let type_matches = block
                .stat_type
                .as_ref()
                .and_then(|t| t.display_name.as_deref())
                .map(|name| name.eq_ignore_ascii_case(stat_type))
                .unwrap_or(false);
            group_matches && type_matches
        })
        .and_then(|block| block.splits.last())
}

fn career_hitting(split: &StatSplit) -> CareerHitting {
    CareerHitting {
        games_played: split.integer("gamesPlayed"),
        avg: split.text("avg"),
        home_runs: split.integer("homeRuns"),
        rbi: split.integer("rbi"),
        hits: split.integer("hits"),
        obp: split.text("obp"),
        slg: split.text("slg"),
        ops: split.text("ops"),
    }
}

fn career_pitching(split: &StatSplit) -> CareerPitching {
    CareerPitching {
        games_played: split.integer("gamesPlayed"),
        wins: split.integer("wins"),
        losses: split.integer("losses"),
        era: split.text("era"),
        strikeouts: split.integer("strikeOuts"),
        whip: split.text("whip"),
        innings_pitched: split.text("inningsPitched"),
    }
}

fn derive_season_metrics(person: &Person) -> SeasonMetrics {
    let hitting = find_split(person, "hitting", "season");
    let pitching = find_split(person, "pitching", "season");

    let ops = hitting.and_then(|split| {
        Some(sabermetrics::ops(split.number("obp")?, split.number("slg")?))
    });
    let iso = hitting.and_then(|split| {
        Some(sabermetrics::iso(split.number("slg")?, split.number("avg")?))
    });

    let innings = pitching
        .and_then(|split| split.text("inningsPitched"))
        .and_then(|raw| sabermetrics::parse_innings(&raw));
    let whip = pitching.and_then(|split| {
        sabermetrics::whip(split.number("baseOnBalls")?, split.number("hits")?, innings?)
    });
    let strikeouts_per_nine =
        pitching.and_then(|split| sabermetrics::strikeouts_per_nine(split.number("strikeOuts")?, innings?));

    SeasonMetrics {
        season: hitting
            .or(pitching)
            .and_then(|split| split.season.clone()),
        ops,
        iso,
        whip,
        strikeouts_per_nine,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fixture() -> Person {
        serde_json::from_value(json!({
            "id": 545361,
            "fullName": "Mike Trout",
            "primaryNumber": "27",
            "currentAge": 32,
            "primaryPosition": { "code": "8", "name": "Outfielder", "abbreviation": "CF" },
            "batSide": { "code": "R", "description": "Right" },
            "pitchHand": { "code": "R", "description": "Right" },
            "active": true,
            "stats": [
                {
                    "type": { "displayName": "season" },
                    "group": { "displayName": "hitting" },
                    "splits": [{
                        "season": "2024",
                        "stat": { "avg": ".280", "obp": ".360", "slg": ".520", "homeRuns": 35 }
                    }]
                },
                {
                    "type": { "displayName": "career" },
                    "group": { "displayName": "hitting" },
                    "splits": [{
                        "stat": {
                            "gamesPlayed": 1500, "avg": ".299", "homeRuns": 378,
                            "rbi": 954, "hits": 1624, "obp": ".408", "slg": ".581", "ops": ".989"
                        }
                    }]
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn season_metrics_derive_ops_and_iso() {
        let metrics = derive_season_metrics(&fixture());

        assert_eq!(metrics.season.as_deref(), Some("2024"));
        assert!((metrics.ops.unwrap() - 0.880).abs() < 1e-9);
        assert!((metrics.iso.unwrap() - 0.240).abs() < 1e-9);
        // No pitching block at all: rates are absent, not zero
        assert_eq!(metrics.whip, None);
        assert_eq!(metrics.strikeouts_per_nine, None);
    }

    #[test]
    fn career_block_located_by_group_and_type() {
        let payload = project_player(fixture());

        let hitting = payload.career_stats.hitting.expect("career hitting present");
        assert_eq!(hitting.games_played, Some(1500));
        assert_eq!(hitting.home_runs, Some(378));
        assert_eq!(hitting.avg.as_deref(), Some(".299"));
        assert!(payload.career_stats.pitching.is_none());
        assert_eq!(payload.player.position.as_deref(), Some("CF"));
    }

    #[test]
    fn pitcher_rates_from_innings_notation() {
        let person: Person = serde_json::from_value(json!({
            "id": 543037,
            "fullName": "Gerrit Cole",
            "stats": [{
                "type": { "displayName": "season" },
                "group": { "displayName": "pitching" },
                "splits": [{
                    "season": "2024",
                    "stat": {
                        "inningsPitched": "180.0", "baseOnBalls": 45,
                        "hits": 140, "strikeOuts": 200
                    }
                }]
            }]
        }))
        .unwrap();

        let metrics = derive_season_metrics(&person);
        assert!((metrics.whip.unwrap() - 185.0 / 180.0).abs() < 1e-9);
        assert!((metrics.strikeouts_per_nine.unwrap() - 10.0).abs() < 1e-9);
        assert_eq!(metrics.ops, None);
    }

    #[test]
    fn zero_innings_reports_no_rates() {
        let person: Person = serde_json::from_value(json!({
            "id": 1,
            "stats": [{
                "type": { "displayName": "season" },
                "group": { "displayName": "pitching" },
                "splits": [{
                    "season": "2024",
                    "stat": { "inningsPitched": "0.0", "baseOnBalls": 1, "hits": 2, "strikeOuts": 3 }
                }]
            }]
        }))
        .unwrap();

        let metrics = derive_season_metrics(&person);
        assert_eq!(metrics.whip, None);
        assert_eq!(metrics.strikeouts_per_nine, None);
    }

    #[test]
    fn player_id_validation() {
        assert_eq!(validate_player_id("545361").unwrap(), 545361);
        assert_eq!(validate_player_id(" 545361 ").unwrap(), 545361);
        assert!(validate_player_id("").is_err());
        assert!(validate_player_id("abc").is_err());
        assert!(validate_player_id("-5").is_err());

        let err = validate_player_id("").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }
}
