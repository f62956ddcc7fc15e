/// Centralized argument handling
///
/// Parsed command-line arguments are stored once at startup and read from
/// anywhere in the application (the logger checks debug tags on every call).
/// Tests and binaries can override the stored arguments explicitly.
use clap::Parser;
use once_cell::sync::OnceCell;

/// Command-line interface for the dugout server
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "dugout", about = "Read-only MLB statistics proxy server")]
pub struct Arguments {
    /// Bind address for the webserver
    #[arg(long)]
    pub host: Option<String>,

    /// Bind port for the webserver
    #[arg(long)]
    pub port: Option<u16>,

    /// Path to a TOML configuration file
    #[arg(long)]
    pub config: Option<String>,

    /// Enable debug logging for a module tag (repeatable), e.g. --debug api
    #[arg(long)]
    pub debug: Vec<String>,

    /// Enable debug logging for every module
    #[arg(long)]
    pub verbose: bool,
}

/// Global argument storage, populated once from main
static CMD_ARGS: OnceCell<Arguments> = OnceCell::new();

/// Store the parsed arguments for global access
/// Used by main at startup and by tests to inject overrides
pub fn set_arguments(args: Arguments) {
    CMD_ARGS.set(args).ok();
}

/// Get the stored arguments, falling back to defaults when unset
pub fn get_arguments() -> Arguments {
    CMD_ARGS.get().cloned().unwrap_or_default()
}

/// Whether debug logging is enabled for the given module tag
pub fn is_debug_enabled(tag: &str) -> bool {
    match CMD_ARGS.get() {
        Some(args) => args.verbose || args.debug.iter().any(|d| d.eq_ignore_ascii_case(tag)),
        None => false,
    }
}

/// Whether verbose mode is active
pub fn is_verbose_enabled() -> bool {
    CMD_ARGS.get().map(|a| a.verbose).unwrap_or(false)
}
