/// Configuration loading and access
///
/// All tunables are defined here with embedded defaults. A TOML file can
/// override any section; command-line flags override the bind address. The
/// loaded config is wrapped in an `Arc` and injected into the application
/// state at startup rather than read through a global.
use crate::arguments::Arguments;
use crate::constants;
use crate::errors::{StatsError, StatsResult};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Top-level application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub cache: CacheConfig,
}

/// Webserver bind configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: constants::DEFAULT_HOST.to_string(),
            port: constants::DEFAULT_PORT,
        }
    }
}

/// Upstream stats API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the stats API (overridable for tests)
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_secs: u64,

    /// Maximum concurrent in-flight upstream requests
    pub max_concurrent: usize,

    /// Upstream rate limit (requests per minute, 0 disables pacing)
    pub rate_limit_per_minute: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: constants::STATS_API_BASE_URL.to_string(),
            timeout_secs: constants::UPSTREAM_TIMEOUT_SECS,
            max_concurrent: constants::UPSTREAM_MAX_CONCURRENT,
            rate_limit_per_minute: constants::UPSTREAM_RATE_LIMIT_PER_MINUTE,
        }
    }
}

/// Cache freshness windows per resource class (seconds)
///
/// Tuned to data volatility: live game data refreshes every few minutes,
/// player and team reference data once a day.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub scoreboard_ttl_secs: u64,
    pub ticker_ttl_secs: u64,
    pub player_ttl_secs: u64,
    pub leaders_ttl_secs: u64,
    pub teams_ttl_secs: u64,
    pub advanced_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            scoreboard_ttl_secs: 5 * 60,
            ticker_ttl_secs: 5 * 60,
            player_ttl_secs: 24 * 60 * 60,
            leaders_ttl_secs: 60 * 60,
            teams_ttl_secs: 24 * 60 * 60,
            advanced_ttl_secs: 12 * 60 * 60,
        }
    }
}

impl CacheConfig {
    pub fn scoreboard_ttl(&self) -> Duration {
        Duration::from_secs(self.scoreboard_ttl_secs)
    }

    pub fn ticker_ttl(&self) -> Duration {
        Duration::from_secs(self.ticker_ttl_secs)
    }

    pub fn player_ttl(&self) -> Duration {
        Duration::from_secs(self.player_ttl_secs)
    }

    pub fn leaders_ttl(&self) -> Duration {
        Duration::from_secs(self.leaders_ttl_secs)
    }

    pub fn teams_ttl(&self) -> Duration {
        Duration::from_secs(self.teams_ttl_secs)
    }

    pub fn advanced_ttl(&self) -> Duration {
        Duration::from_secs(self.advanced_ttl_secs)
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when no
    /// path is given or the file does not exist.
    pub fn load(path: Option<&str>) -> StatsResult<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        if !Path::new(path).exists() {
            return Err(StatsError::Config(format!("Config file not found: {}", path)));
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| StatsError::Config(format!("Failed to read {}: {}", path, e)))?;

        toml::from_str(&contents)
            .map_err(|e| StatsError::Config(format!("Failed to parse {}: {}", path, e)))
    }

    /// Apply command-line overrides on top of the loaded file
    pub fn apply_arguments(&mut self, args: &Arguments) {
        if let Some(host) = &args.host {
            self.server.host = host.clone();
        }
        if let Some(port) = args.port {
            self.server.port = port;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_ttl_policy() {
        let config = Config::default();
        assert_eq!(config.cache.scoreboard_ttl(), Duration::from_secs(300));
        assert_eq!(config.cache.ticker_ttl(), Duration::from_secs(300));
        assert_eq!(config.cache.player_ttl(), Duration::from_secs(86_400));
        assert_eq!(config.cache.leaders_ttl(), Duration::from_secs(3_600));
        assert_eq!(config.cache.teams_ttl(), Duration::from_secs(86_400));
        assert_eq!(config.cache.advanced_ttl(), Duration::from_secs(43_200));
    }

    #[test]
    fn toml_overrides_defaults() {
        let parsed: Config = toml::from_str(
            r#"
            [server]
            port = 9999

            [cache]
            scoreboard_ttl_secs = 60
            "#,
        )
        .unwrap();

        assert_eq!(parsed.server.port, 9999);
        assert_eq!(parsed.server.host, constants::DEFAULT_HOST);
        assert_eq!(parsed.cache.scoreboard_ttl(), Duration::from_secs(60));
        assert_eq!(parsed.cache.player_ttl(), Duration::from_secs(86_400));
    }
}
