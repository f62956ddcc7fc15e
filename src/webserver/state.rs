/// Shared application state for the webserver
///
/// Owns the upstream client and every endpoint adapter. Adapters (and the
/// caches inside them) are constructed here once at startup and injected
/// into route handlers through axum state - no module-level globals, and
/// tests can build isolated instances.
use crate::advanced::mock::GeneratedDatasets;
use crate::advanced::AdvancedAdapter;
use crate::apis::statsapi::StatsApiClient;
use crate::cache::CacheMetrics;
use crate::config::Config;
use crate::errors::StatsResult;
use crate::leaders::LeadersAdapter;
use crate::players::PlayerAdapter;
use crate::scoreboard::mock::GeneratedSchedule;
use crate::scoreboard::ticker::TickerAdapter;
use crate::scoreboard::ScoreboardAdapter;
use crate::teams::TeamsAdapter;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared application state passed to all route handlers
pub struct AppState {
    pub config: Arc<Config>,
    pub scoreboard: ScoreboardAdapter,
    pub ticker: TickerAdapter,
    pub players: PlayerAdapter,
    pub leaders: LeadersAdapter,
    pub teams: TeamsAdapter,
    pub advanced: AdvancedAdapter,
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    /// Create the application state: one upstream client shared by every
    /// adapter, one cache per adapter with its configured TTL.
    pub fn new(config: Arc<Config>) -> StatsResult<Self> {
        let client = Arc::new(StatsApiClient::new(&config.upstream)?);
        let ttls = &config.cache;

        Ok(Self {
            scoreboard: ScoreboardAdapter::new(Arc::clone(&client), ttls.scoreboard_ttl())
                .with_mock(Arc::new(GeneratedSchedule)),
            ticker: TickerAdapter::new(Arc::clone(&client), ttls.ticker_ttl()),
            players: PlayerAdapter::new(Arc::clone(&client), ttls.player_ttl()),
            leaders: LeadersAdapter::new(Arc::clone(&client), ttls.leaders_ttl()),
            teams: TeamsAdapter::new(Arc::clone(&client), ttls.teams_ttl()),
            advanced: AdvancedAdapter::new(Arc::new(GeneratedDatasets), ttls.advanced_ttl()),
            config,
            startup_time: chrono::Utc::now(),
        })
    }

    /// Server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time).num_seconds().max(0) as u64
    }

    /// Per-adapter cache counters for the status endpoint
    pub fn cache_report(&self) -> HashMap<&'static str, CacheMetrics> {
        HashMap::from([
            ("scoreboard", self.scoreboard.metrics()),
            ("ticker", self.ticker.metrics()),
            ("players", self.players.metrics()),
            ("leaders", self.leaders.metrics()),
            ("teams", self.teams.metrics()),
            ("advanced", self.advanced.metrics()),
        ])
    }
}
