/// Application-wide constants
///
/// Upstream endpoint configuration and default tuning values live here so
/// the rest of the codebase never hardcodes them inline.

/// Base URL of the MLB Stats API
pub const STATS_API_BASE_URL: &str = "https://statsapi.mlb.com/api/v1";

/// Sport identifier for MLB in the upstream API
pub const SPORT_ID: u32 = 1;

/// Request timeout in seconds - the stats API is fast, 10s is sufficient
pub const UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Maximum concurrent in-flight upstream requests
pub const UPSTREAM_MAX_CONCURRENT: usize = 4;

/// Upstream rate limit (requests per minute)
pub const UPSTREAM_RATE_LIMIT_PER_MINUTE: usize = 120;

/// Full hydration for the scoreboard schedule call
pub const HYDRATE_SCOREBOARD: &str = "team,linescore,flags,liveLookin,probablePitcher";

/// Minimal hydration for the ticker - only what the reduced payload needs
pub const HYDRATE_TICKER: &str = "team,linescore";

/// Stat-block hydration for player detail
pub const HYDRATE_PLAYER: &str = "stats(group=[hitting,pitching],type=[season,career])";

/// Logo hydration for the team directory
pub const HYDRATE_TEAMS: &str = "team(logo)";

/// Default webserver bind address
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;

/// Default result limit for stat leaders
pub const DEFAULT_LEADERS_LIMIT: u32 = 10;

/// Upper bound for the stat leaders limit parameter
pub const MAX_LEADERS_LIMIT: u32 = 50;
