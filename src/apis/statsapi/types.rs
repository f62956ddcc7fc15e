/// Raw payload types for the MLB Stats API
///
/// Only the fields the adapters project are modeled; everything else in the
/// upstream JSON is ignored. Fields are optional wherever the API omits them
/// for some game states or hydration levels.
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

// ============================================================================
// SCHEDULE / SCOREBOARD
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResponse {
    #[serde(default)]
    pub dates: Vec<ScheduleDate>,
    pub total_games: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDate {
    pub date: Option<String>,
    #[serde(default)]
    pub games: Vec<Game>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub game_pk: i64,
    pub game_date: Option<DateTime<Utc>>,
    pub status: GameStatus,
    pub teams: GameTeams,
    pub linescore: Option<Linescore>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatus {
    pub abstract_game_state: Option<String>,
    pub detailed_state: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTeams {
    pub away: GameSide,
    pub home: GameSide,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSide {
    pub score: Option<u32>,
    pub team: TeamRef,
    pub is_winner: Option<bool>,
}

/// Minimal team reference embedded in games, leaders and rosters
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    pub id: i64,
    pub name: Option<String>,
    pub team_name: Option<String>,
    pub abbreviation: Option<String>,
}

impl TeamRef {
    /// Abbreviation with a fallback derived from the club name
    pub fn abbreviation_or_derived(&self) -> String {
        if let Some(abbr) = &self.abbreviation {
            return abbr.clone();
        }
        let source = self.team_name.as_deref().or(self.name.as_deref()).unwrap_or("");
        source.chars().take(3).collect::<String>().to_uppercase()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Linescore {
    pub current_inning: Option<u32>,
    pub inning_half: Option<String>,
    pub inning_state: Option<String>,
}

// ============================================================================
// PEOPLE / PLAYER DETAIL
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct PersonResponse {
    #[serde(default)]
    pub people: Vec<Person>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: i64,
    pub full_name: Option<String>,
    pub primary_number: Option<String>,
    pub birth_date: Option<String>,
    pub current_age: Option<u32>,
    pub current_team: Option<TeamRef>,
    pub primary_position: Option<Position>,
    pub bat_side: Option<CodeDescription>,
    pub pitch_hand: Option<CodeDescription>,
    pub mlb_debut_date: Option<String>,
    pub active: Option<bool>,
    #[serde(default)]
    pub stats: Vec<StatBlock>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub code: Option<String>,
    pub name: Option<String>,
    pub abbreviation: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeDescription {
    pub code: Option<String>,
    pub description: Option<String>,
}

/// One hydrated stat block, identified by group and type display names
/// (e.g. group "hitting", type "career")
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatBlock {
    #[serde(rename = "type")]
    pub stat_type: Option<NamedRef>,
    pub group: Option<NamedRef>,
    #[serde(default)]
    pub splits: Vec<StatSplit>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedRef {
    pub display_name: Option<String>,
}

/// A single stat line. The upstream mixes numeric and string encodings for
/// the same stat depending on category (averages come as ".280"), so the
/// stat object is kept raw and read through the typed accessors below.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatSplit {
    pub season: Option<String>,
    #[serde(default)]
    pub stat: Value,
}

impl StatSplit {
    /// Numeric stat, accepting both number and string encodings
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.stat.get(key) {
            Some(Value::Number(n)) => n.as_f64(),
            Some(Value::String(s)) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Counting stat truncated to an integer
    pub fn integer(&self, key: &str) -> Option<i64> {
        self.number(key).map(|n| n as i64)
    }

    /// Stat in its upstream string form (e.g. a formatted average)
    pub fn text(&self, key: &str) -> Option<String> {
        match self.stat.get(key) {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }
}

// ============================================================================
// STAT LEADERS
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct LeadersResponse {
    #[serde(rename = "leagueLeaders", alias = "leaderCategories", default)]
    pub league_leaders: Vec<LeaderCategory>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderCategory {
    pub leader_category: Option<String>,
    pub season: Option<String>,
    pub stat_group: Option<NamedRef>,
    #[serde(default)]
    pub leaders: Vec<LeaderEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderEntry {
    pub rank: Option<u32>,
    pub value: Option<String>,
    pub person: Option<PersonRef>,
    pub team: Option<TeamRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRef {
    pub id: i64,
    pub full_name: Option<String>,
}

// ============================================================================
// TEAM DIRECTORY
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct TeamsResponse {
    #[serde(default)]
    pub teams: Vec<UpstreamTeam>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamTeam {
    pub id: i64,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub team_name: Option<String>,
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub team_logos: Vec<TeamLogo>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamLogo {
    pub logo_type: Option<String>,
    pub url: Option<String>,
}
