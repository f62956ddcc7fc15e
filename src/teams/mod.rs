/// Team directory adapter
///
/// Projects the upstream team list into a simplified shape with a preferred
/// logo and default brand colors, and builds a by-id lookup map from the
/// same list in one pass. Both representations come from one upstream call
/// and are cached together.
use crate::apis::statsapi::{StatsApiClient, TeamsResponse, UpstreamTeam};
use crate::cache::{CacheMetrics, FetchCache, Fetched};
use crate::errors::{StatsError, StatsResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

const DEFAULT_PRIMARY_COLOR: &str = "#000000";
const DEFAULT_SECONDARY_COLOR: &str = "#FFFFFF";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamsPayload {
    pub teams: Vec<TeamView>,
    pub teams_by_id: HashMap<i64, TeamView>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamView {
    pub id: i64,
    pub name: Option<String>,
    pub short_name: Option<String>,
    pub team_name: Option<String>,
    pub abbreviation: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub secondary_color: String,
}

pub struct TeamsAdapter {
    client: Arc<StatsApiClient>,
    cache: FetchCache<TeamsPayload>,
    ttl: Duration,
}

impl TeamsAdapter {
    pub fn new(client: Arc<StatsApiClient>, ttl: Duration) -> Self {
        Self {
            client,
            cache: FetchCache::new("teams"),
            ttl,
        }
    }

    /// Team directory, optionally filtered to one team id
    pub async fn teams(&self, team_id: Option<&str>) -> StatsResult<Fetched<TeamsPayload>> {
        let team_id = validate_team_id(team_id)?;
        let key = match team_id {
            Some(id) => format!("teams:{}", id),
            None => "teams:all".to_string(),
        };

        let client = Arc::clone(&self.client);
        self.cache
            .get_or_fetch(&key, self.ttl, || async move {
                let raw = client.teams(team_id).await?;
                Ok(project_teams(raw))
            })
            .await
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.cache.metrics()
    }
}

fn validate_team_id(raw: Option<&str>) -> StatsResult<Option<i64>> {
    match raw {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => match raw.trim().parse::<i64>() {
            Ok(id) if id > 0 => Ok(Some(id)),
            _ => Err(StatsError::validation(
                "teamId",
                format!("expected a positive integer, got '{}'", raw),
            )),
        },
    }
}

pub fn project_teams(raw: TeamsResponse) -> TeamsPayload {
    let teams: Vec<TeamView> = raw.teams.into_iter().map(simplify_team).collect();
    let teams_by_id = teams.iter().map(|team| (team.id, team.clone())).collect();

    TeamsPayload {
        teams,
        teams_by_id,
        timestamp: Utc::now(),
    }
}

fn simplify_team(team: UpstreamTeam) -> TeamView {
    // Prefer the logo tagged "primary", falling back to the first one
    let logo_url = team
        .team_logos
        .iter()
        .find(|logo| logo.logo_type.as_deref() == Some("primary"))
        .or_else(|| team.team_logos.first())
        .and_then(|logo| logo.url.clone());

    TeamView {
        id: team.id,
        name: team.name,
        short_name: team.short_name,
        team_name: team.team_name,
        abbreviation: team.abbreviation,
        logo_url,
        primary_color: team
            .primary_color
            .unwrap_or_else(|| DEFAULT_PRIMARY_COLOR.to_string()),
        secondary_color: team
            .secondary_color
            .unwrap_or_else(|| DEFAULT_SECONDARY_COLOR.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn projection_prefers_primary_logo_and_builds_lookup() {
        let raw: TeamsResponse = serde_json::from_value(json!({
            "teams": [
                {
                    "id": 147,
                    "name": "New York Yankees",
                    "shortName": "NY Yankees",
                    "teamName": "Yankees",
                    "abbreviation": "NYY",
                    "teamLogos": [
                        { "logoType": "dark", "url": "https://img.example/147-dark.svg" },
                        { "logoType": "primary", "url": "https://img.example/147.svg" }
                    ],
                    "primaryColor": "#003DA5"
                },
                {
                    "id": 111,
                    "name": "Boston Red Sox",
                    "abbreviation": "BOS",
                    "teamLogos": [
                        { "logoType": "dark", "url": "https://img.example/111-dark.svg" }
                    ]
                }
            ]
        }))
        .unwrap();

        let payload = project_teams(raw);
        assert_eq!(payload.teams.len(), 2);

        let yankees = &payload.teams_by_id[&147];
        assert_eq!(yankees.logo_url.as_deref(), Some("https://img.example/147.svg"));
        assert_eq!(yankees.primary_color, "#003DA5");
        assert_eq!(yankees.secondary_color, DEFAULT_SECONDARY_COLOR);

        // No primary-tagged logo: first available wins; missing colors default
        let red_sox = &payload.teams_by_id[&111];
        assert_eq!(red_sox.logo_url.as_deref(), Some("https://img.example/111-dark.svg"));
        assert_eq!(red_sox.primary_color, DEFAULT_PRIMARY_COLOR);
    }

    #[test]
    fn team_id_validation() {
        assert_eq!(validate_team_id(None).unwrap(), None);
        assert_eq!(validate_team_id(Some("")).unwrap(), None);
        assert_eq!(validate_team_id(Some("147")).unwrap(), Some(147));
        assert!(validate_team_id(Some("yankees")).is_err());
        assert!(validate_team_id(Some("-1")).is_err());
    }
}
