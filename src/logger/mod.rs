//! Structured logging with per-module debug filtering
//!
//! Provides a small, ergonomic logging API:
//! - Standard log levels (Error/Warning/Info/Debug)
//! - Per-module debug control via repeated `--debug <tag>` flags
//! - Colored console output with timestamps
//!
//! ## Usage
//!
//! ```rust
//! use dugout::logger::{self, LogTag};
//!
//! logger::error(LogTag::Api, "Connection failed");
//! logger::warning(LogTag::Cache, "Serving stale entry");
//! logger::info(LogTag::Webserver, "Listening on 127.0.0.1:8080");
//! logger::debug(LogTag::Api, "Request details: ..."); // Only with --debug api
//! ```

mod levels;
mod tags;

pub use levels::LogLevel;
pub use tags::LogTag;

use crate::arguments;
use chrono::Local;

/// Check if a log message should be displayed
///
/// Errors and warnings always log; info logs by default; debug requires the
/// matching `--debug <tag>` flag or `--verbose`.
fn should_log(tag: LogTag, level: LogLevel) -> bool {
    match level {
        LogLevel::Error | LogLevel::Warning | LogLevel::Info => true,
        LogLevel::Debug => arguments::is_debug_enabled(tag.as_str()),
    }
}

fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(tag, level) {
        return;
    }

    let time = Local::now().format("%H:%M:%S");
    println!("{} [{}] [{}] {}", time, tag.colored(), level.colored(), message);
}

/// Log at ERROR level (always shown, critical issues)
pub fn error(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Error, message);
}

/// Log at WARNING level (important issues)
pub fn warning(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Warning, message);
}

/// Log at INFO level (standard operations)
pub fn info(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Info, message);
}

/// Log at DEBUG level (detailed diagnostics, gated by --debug <tag>)
pub fn debug(tag: LogTag, message: &str) {
    log_internal(tag, LogLevel::Debug, message);
}
