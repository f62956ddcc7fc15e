/// Advanced stats tables
///
/// Serves sortable stat tables (batting, pitching, fielding, statcast and a
/// merged comparison view) with per-column display metadata. The data source
/// is a pluggable provider; the default generates realistic datasets, and
/// responses served from it are flagged `mock` so the UI can label them.
pub mod mock;

use crate::cache::{CacheMetrics, FetchCache, Fetched};
use crate::errors::{StatsError, StatsResult};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableType {
    Batting,
    Pitching,
    Fielding,
    Statcast,
    Comparison,
}

impl TableType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableType::Batting => "batting",
            TableType::Pitching => "pitching",
            TableType::Fielding => "fielding",
            TableType::Statcast => "statcast",
            TableType::Comparison => "comparison",
        }
    }

    pub fn parse(raw: &str) -> StatsResult<Self> {
        match raw {
            "batting" => Ok(TableType::Batting),
            "pitching" => Ok(TableType::Pitching),
            "fielding" => Ok(TableType::Fielding),
            "statcast" => Ok(TableType::Statcast),
            "comparison" => Ok(TableType::Comparison),
            other => Err(StatsError::validation(
                "type",
                format!("invalid stats type '{}'", other),
            )),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            TableType::Batting => "Batting Statistics",
            TableType::Pitching => "Pitching Statistics",
            TableType::Fielding => "Fielding Statistics",
            TableType::Statcast => "Statcast Data",
            TableType::Comparison => "Player Comparison",
        }
    }
}

/// Column display metadata, mirrored by the table renderer
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnMeta {
    pub key: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<&'static str>,
}

const fn col(key: &'static str, label: &'static str, format: Option<&'static str>) -> ColumnMeta {
    ColumnMeta { key, label, format }
}

pub fn columns_for(table: TableType) -> &'static [ColumnMeta] {
    match table {
        TableType::Batting => BATTING_COLUMNS,
        TableType::Pitching => PITCHING_COLUMNS,
        TableType::Fielding => FIELDING_COLUMNS,
        TableType::Statcast => STATCAST_COLUMNS,
        TableType::Comparison => COMPARISON_COLUMNS,
    }
}

const BATTING_COLUMNS: &[ColumnMeta] = &[
    col("name", "Player", None),
    col("team", "Team", None),
    col("position", "Pos", None),
    col("G", "G", Some("integer")),
    col("PA", "PA", Some("integer")),
    col("AB", "AB", Some("integer")),
    col("H", "H", Some("integer")),
    col("HR", "HR", Some("integer")),
    col("RBI", "RBI", Some("integer")),
    col("SB", "SB", Some("integer")),
    col("AVG", "AVG", Some("decimal")),
    col("OBP", "OBP", Some("decimal")),
    col("SLG", "SLG", Some("decimal")),
    col("OPS", "OPS", Some("decimal")),
    col("WAR", "WAR", Some("decimal2")),
    col("wOBA", "wOBA", Some("decimal")),
    col("xwOBA", "xwOBA", Some("decimal")),
];

const PITCHING_COLUMNS: &[ColumnMeta] = &[
    col("name", "Player", None),
    col("team", "Team", None),
    col("W", "W", Some("integer")),
    col("L", "L", Some("integer")),
    col("ERA", "ERA", Some("decimal2")),
    col("G", "G", Some("integer")),
    col("GS", "GS", Some("integer")),
    col("SV", "SV", Some("integer")),
    col("IP", "IP", Some("decimal2")),
    col("SO", "SO", Some("integer")),
    col("BB", "BB", Some("integer")),
    col("WHIP", "WHIP", Some("decimal2")),
    col("K9", "K/9", Some("decimal2")),
    col("FIP", "FIP", Some("decimal2")),
    col("WAR", "WAR", Some("decimal2")),
];

const FIELDING_COLUMNS: &[ColumnMeta] = &[
    col("name", "Player", None),
    col("team", "Team", None),
    col("position", "Pos", None),
    col("G", "G", Some("integer")),
    col("INN", "Inn", Some("decimal2")),
    col("PO", "PO", Some("integer")),
    col("A", "A", Some("integer")),
    col("E", "E", Some("integer")),
    col("DP", "DP", Some("integer")),
    col("FP", "FP", Some("decimal")),
    col("DRS", "DRS", Some("integer")),
    col("OAA", "OAA", Some("integer")),
];

const STATCAST_COLUMNS: &[ColumnMeta] = &[
    col("name", "Player", None),
    col("team", "Team", None),
    col("exit_velocity", "Exit Velo", Some("decimal2")),
    col("launch_angle", "Launch Angle", Some("decimal2")),
    col("sprint_speed", "Sprint Speed", Some("decimal2")),
    col("barrel_pct", "Barrel %", Some("percent")),
    col("hard_hit_pct", "Hard Hit %", Some("percent")),
    col("xBA", "xBA", Some("decimal")),
    col("xSLG", "xSLG", Some("decimal")),
    col("xwOBA", "xwOBA", Some("decimal")),
    col("whiff_pct", "Whiff %", Some("percent")),
];

const COMPARISON_COLUMNS: &[ColumnMeta] = &[
    col("name", "Player", None),
    col("team", "Team", None),
    col("position", "Pos", None),
    col("AVG", "AVG", Some("decimal")),
    col("OBP", "OBP", Some("decimal")),
    col("SLG", "SLG", Some("decimal")),
    col("OPS", "OPS", Some("decimal")),
    col("HR", "HR", Some("integer")),
    col("RBI", "RBI", Some("integer")),
    col("WAR", "WAR", Some("decimal2")),
    col("barrel_pct", "Barrel %", Some("percent")),
    col("exit_velocity", "Exit Velo", Some("decimal2")),
];

/// Pluggable source of advanced-stat rows
///
/// The default implementation generates datasets; a future real source
/// (e.g. a statcast export) plugs in without touching the adapter.
pub trait DatasetProvider: Send + Sync {
    fn dataset(&self, table: TableType, season: &str) -> Vec<Value>;

    /// Whether rows are generated rather than sourced from real data
    fn is_generated(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedPayload {
    pub stats_type: String,
    pub season: String,
    pub title: String,
    pub columns: Vec<ColumnMeta>,
    pub rows: Vec<Value>,
    pub timestamp: DateTime<Utc>,
}

pub struct AdvancedAdapter {
    provider: Arc<dyn DatasetProvider>,
    cache: FetchCache<AdvancedPayload>,
    ttl: Duration,
}

impl AdvancedAdapter {
    pub fn new(provider: Arc<dyn DatasetProvider>, ttl: Duration) -> Self {
        Self {
            provider,
            cache: FetchCache::new("advanced"),
            ttl,
        }
    }

    pub async fn table(&self, stats_type: &str, season: Option<&str>) -> StatsResult<Fetched<AdvancedPayload>> {
        let table = TableType::parse(stats_type)?;
        let season = validate_season(season)?;
        let key = format!("advanced:{}:{}", table.as_str(), season);

        let provider = Arc::clone(&self.provider);
        let season_for_fetch = season.clone();
        let mut fetched = self
            .cache
            .get_or_fetch(&key, self.ttl, || async move {
                Ok(build_table(table, &season_for_fetch, provider.as_ref()))
            })
            .await?;

        fetched.mock = self.provider.is_generated();
        Ok(fetched)
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.cache.metrics()
    }
}

fn validate_season(raw: Option<&str>) -> StatsResult<String> {
    match raw {
        Some(raw) if !raw.is_empty() => {
            if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
                Ok(raw.to_string())
            } else {
                Err(StatsError::validation(
                    "season",
                    format!("expected a four-digit year, got '{}'", raw),
                ))
            }
        }
        _ => Ok(Utc::now().year().to_string()),
    }
}

pub fn build_table(table: TableType, season: &str, provider: &dyn DatasetProvider) -> AdvancedPayload {
    AdvancedPayload {
        stats_type: table.as_str().to_string(),
        season: season.to_string(),
        title: table.title().to_string(),
        columns: columns_for(table).to_vec(),
        rows: provider.dataset(table, season),
        timestamp: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advanced::mock::GeneratedDatasets;

    #[test]
    fn type_parameter_validation() {
        assert!(TableType::parse("batting").is_ok());
        assert!(TableType::parse("comparison").is_ok());

        let err = TableType::parse("bowling").unwrap_err();
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn table_rows_carry_every_column_key() {
        let provider = GeneratedDatasets::default();
        for table in [
            TableType::Batting,
            TableType::Pitching,
            TableType::Fielding,
            TableType::Statcast,
            TableType::Comparison,
        ] {
            let payload = build_table(table, "2024", &provider);
            assert!(!payload.rows.is_empty(), "{} rows missing", table.as_str());

            let first = payload.rows.first().unwrap();
            for column in payload.columns.iter() {
                assert!(
                    first.get(column.key).is_some(),
                    "{} row lacks key {}",
                    table.as_str(),
                    column.key
                );
            }
        }
    }

    #[tokio::test]
    async fn generated_tables_are_flagged_mock_and_cached() {
        let adapter = AdvancedAdapter::new(
            Arc::new(GeneratedDatasets::default()),
            Duration::from_secs(60),
        );

        let first = adapter.table("batting", Some("2024")).await.unwrap();
        assert!(first.mock);
        assert!(!first.cached);

        let second = adapter.table("batting", Some("2024")).await.unwrap();
        assert!(second.cached);
        assert!(second.mock);
    }
}
