/// Module tags for structured logging
///
/// Each tag corresponds to a subsystem and to a `--debug <tag>` flag.
use colored::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTag {
    Api,
    Cache,
    Scoreboard,
    Players,
    Leaders,
    Teams,
    Advanced,
    Webserver,
    Config,
    System,
}

impl LogTag {
    /// String representation used in log output and debug flags
    pub fn as_str(&self) -> &'static str {
        match self {
            LogTag::Api => "api",
            LogTag::Cache => "cache",
            LogTag::Scoreboard => "scoreboard",
            LogTag::Players => "players",
            LogTag::Leaders => "leaders",
            LogTag::Teams => "teams",
            LogTag::Advanced => "advanced",
            LogTag::Webserver => "webserver",
            LogTag::Config => "config",
            LogTag::System => "system",
        }
    }

    /// Colorized tag label for console output
    pub fn colored(&self) -> ColoredString {
        let label = format!("{:<10}", self.as_str().to_uppercase());
        match self {
            LogTag::Api => label.cyan(),
            LogTag::Cache => label.magenta(),
            LogTag::Scoreboard | LogTag::Players | LogTag::Leaders | LogTag::Teams | LogTag::Advanced => {
                label.green()
            }
            LogTag::Webserver => label.blue(),
            LogTag::Config | LogTag::System => label.yellow(),
        }
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
