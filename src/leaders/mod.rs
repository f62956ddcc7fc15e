/// Stat leaders adapter
///
/// One upstream call fetches every category for the requested stat group;
/// the projection attaches static display metadata and formats each leader
/// value per its category's numeric format.
pub mod categories;

pub use categories::{categories_for, format_stat_value, CategoryMeta, StatFormat, StatGroup, StatType};

use crate::apis::statsapi::{LeadersResponse, StatsApiClient};
use crate::cache::{CacheMetrics, FetchCache, Fetched};
use crate::constants;
use crate::errors::{StatsError, StatsResult};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadersPayload {
    pub stat_group: String,
    pub stat_type: String,
    pub season: String,
    pub categories: Vec<CategoryView>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub category: String,
    pub display_name: String,
    pub short_name: String,
    pub description: String,
    pub format: StatFormat,
    pub leaders: Vec<LeaderView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderView {
    pub rank: u32,
    pub player_id: Option<i64>,
    pub player_name: Option<String>,
    pub team_abbreviation: Option<String>,
    pub value: Option<String>,
    pub formatted_value: Option<String>,
}

/// Validated request parameters for a leaders lookup
#[derive(Debug, Clone)]
pub struct LeadersRequest {
    pub group: StatGroup,
    pub stat_type: StatType,
    pub season: String,
    pub limit: u32,
}

impl LeadersRequest {
    /// Validate raw query parameters, applying the documented defaults
    pub fn from_params(
        group: Option<&str>,
        stat_type: Option<&str>,
        season: Option<&str>,
        limit: Option<&str>,
    ) -> StatsResult<Self> {
        let group = match group {
            Some(raw) if !raw.is_empty() => StatGroup::parse(raw)?,
            _ => StatGroup::Hitting,
        };
        let stat_type = match stat_type {
            Some(raw) if !raw.is_empty() => StatType::parse(raw)?,
            _ => StatType::Season,
        };
        let season = match season {
            Some(raw) if !raw.is_empty() => {
                if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
                    raw.to_string()
                } else {
                    return Err(StatsError::validation(
                        "season",
                        format!("expected a four-digit year, got '{}'", raw),
                    ));
                }
            }
            _ => Utc::now().year().to_string(),
        };
        let limit = match limit {
            Some(raw) if !raw.is_empty() => match raw.parse::<u32>() {
                Ok(n) if (1..=constants::MAX_LEADERS_LIMIT).contains(&n) => n,
                _ => {
                    return Err(StatsError::validation(
                        "limit",
                        format!("expected 1..={}, got '{}'", constants::MAX_LEADERS_LIMIT, raw),
                    ))
                }
            },
            _ => constants::DEFAULT_LEADERS_LIMIT,
        };

        Ok(Self {
            group,
            stat_type,
            season,
            limit,
        })
    }

    fn cache_key(&self) -> String {
        format!(
            "leaders:{}:{}:{}:{}",
            self.group.as_str(),
            self.stat_type.as_str(),
            self.season,
            self.limit
        )
    }
}

pub struct LeadersAdapter {
    client: Arc<StatsApiClient>,
    cache: FetchCache<LeadersPayload>,
    ttl: Duration,
}

impl LeadersAdapter {
    pub fn new(client: Arc<StatsApiClient>, ttl: Duration) -> Self {
        Self {
            client,
            cache: FetchCache::new("leaders"),
            ttl,
        }
    }

    pub async fn leaders(&self, request: LeadersRequest) -> StatsResult<Fetched<LeadersPayload>> {
        let key = request.cache_key();
        let client = Arc::clone(&self.client);

        self.cache
            .get_or_fetch(&key, self.ttl, || async move {
                let category_names: Vec<&str> = categories_for(request.group)
                    .iter()
                    .map(|meta| meta.category)
                    .collect();
                let raw = client
                    .stat_leaders(
                        &category_names.join(","),
                        request.group.as_str(),
                        request.stat_type.as_str(),
                        &request.season,
                        request.limit,
                    )
                    .await?;
                Ok(project_leaders(&request, raw))
            })
            .await
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.cache.metrics()
    }
}

pub fn project_leaders(request: &LeadersRequest, raw: LeadersResponse) -> LeadersPayload {
    let categories = categories_for(request.group)
        .iter()
        .map(|meta| {
            let leaders = raw
                .league_leaders
                .iter()
                .find(|category| category.leader_category.as_deref() == Some(meta.category))
                .map(|category| {
                    category
                        .leaders
                        .iter()
                        .take(request.limit as usize)
                        .enumerate()
                        .map(|(index, entry)| LeaderView {
                            rank: entry.rank.unwrap_or(index as u32 + 1),
                            player_id: entry.person.as_ref().map(|p| p.id),
                            player_name: entry.person.as_ref().and_then(|p| p.full_name.clone()),
                            team_abbreviation: entry.team.as_ref().map(|t| t.abbreviation_or_derived()),
                            value: entry.value.clone(),
                            formatted_value: entry
                                .value
                                .as_deref()
                                .and_then(|raw_value| raw_value.trim().parse::<f64>().ok())
                                .map(|number| format_stat_value(number, meta.format))
                                .or_else(|| entry.value.clone()),
                        })
                        .collect()
                })
                .unwrap_or_default();

            CategoryView {
                category: meta.category.to_string(),
                display_name: meta.display_name.to_string(),
                short_name: meta.short_name.to_string(),
                description: meta.description.to_string(),
                format: meta.format,
                leaders,
            }
        })
        .collect();

    LeadersPayload {
        stat_group: request.group.as_str().to_string(),
        stat_type: request.stat_type.as_str().to_string(),
        season: request.season.clone(),
        categories,
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> LeadersRequest {
        LeadersRequest::from_params(Some("hitting"), Some("season"), Some("2024"), Some("5")).unwrap()
    }

    #[test]
    fn defaults_applied_when_params_absent() {
        let req = LeadersRequest::from_params(None, None, None, None).unwrap();
        assert_eq!(req.group, StatGroup::Hitting);
        assert_eq!(req.stat_type, StatType::Season);
        assert_eq!(req.limit, constants::DEFAULT_LEADERS_LIMIT);
        assert_eq!(req.season.len(), 4);
    }

    #[test]
    fn invalid_params_rejected() {
        assert!(LeadersRequest::from_params(Some("bowling"), None, None, None).is_err());
        assert!(LeadersRequest::from_params(None, Some("decade"), None, None).is_err());
        assert!(LeadersRequest::from_params(None, None, Some("24"), None).is_err());
        assert!(LeadersRequest::from_params(None, None, None, Some("0")).is_err());
        assert!(LeadersRequest::from_params(None, None, None, Some("999")).is_err());
    }

    #[test]
    fn cache_key_covers_every_parameter() {
        let req = request();
        assert_eq!(req.cache_key(), "leaders:hitting:season:2024:5");

        let other = LeadersRequest::from_params(Some("hitting"), Some("career"), Some("2024"), Some("5")).unwrap();
        assert_ne!(req.cache_key(), other.cache_key());
    }

    #[test]
    fn projection_attaches_metadata_and_formats_values() {
        let raw: LeadersResponse = serde_json::from_value(json!({
            "leagueLeaders": [
                {
                    "leaderCategory": "homeRuns",
                    "leaders": [
                        { "rank": 1, "value": "54", "person": { "id": 592450, "fullName": "Aaron Judge" },
                          "team": { "id": 147, "name": "New York Yankees", "abbreviation": "NYY" } }
                    ]
                },
                {
                    "leaderCategory": "battingAverage",
                    "leaders": [
                        { "rank": 1, "value": ".332", "person": { "id": 665742, "fullName": "Juan Soto" },
                          "team": { "id": 121, "name": "New York Mets", "abbreviation": "NYM" } }
                    ]
                }
            ]
        }))
        .unwrap();

        let payload = project_leaders(&request(), raw);

        // Every configured category appears even when upstream omitted it
        assert_eq!(payload.categories.len(), categories_for(StatGroup::Hitting).len());

        let home_runs = &payload.categories[0];
        assert_eq!(home_runs.display_name, "Home Runs");
        assert_eq!(home_runs.short_name, "HR");
        let judge = &home_runs.leaders[0];
        assert_eq!(judge.player_name.as_deref(), Some("Aaron Judge"));
        assert_eq!(judge.formatted_value.as_deref(), Some("54"));

        let average = &payload.categories[1];
        assert_eq!(average.leaders[0].formatted_value.as_deref(), Some(".332"));

        // Categories missing upstream come back with empty leader lists
        assert!(payload.categories[3].leaders.is_empty());
    }
}
