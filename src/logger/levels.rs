/// Log level definitions for structured logging
///
/// Levels are ordered by severity (Error < Warning < Info < Debug).
/// Debug is gated per module by the --debug <tag> flag.
use colored::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error = 0,   // Critical errors, always shown
    Warning = 1, // Important issues that need attention
    Info = 2,    // Standard operational messages (default)
    Debug = 3,   // Detailed diagnostic info (gated by --debug <tag>)
}

impl LogLevel {
    /// Get string representation for logging
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Colorized level label for console output
    pub fn colored(&self) -> ColoredString {
        let label = format!("{:<5}", self.as_str());
        match self {
            LogLevel::Error => label.red().bold(),
            LogLevel::Warning => label.yellow(),
            LogLevel::Info => label.normal(),
            LogLevel::Debug => label.dimmed(),
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
