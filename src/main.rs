use anyhow::Context;
use clap::Parser;
use std::sync::Arc;

use dugout::arguments::{self, Arguments};
use dugout::config::Config;
use dugout::logger::{self, LogTag};
use dugout::webserver::{self, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Arguments::parse();
    arguments::set_arguments(args.clone());

    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    config.apply_arguments(&args);

    logger::info(
        LogTag::System,
        &format!("dugout v{} starting up", env!("CARGO_PKG_VERSION")),
    );
    logger::debug(
        LogTag::Config,
        &format!("Upstream base URL: {}", config.upstream.base_url),
    );

    let state = Arc::new(AppState::new(Arc::new(config)).context("Failed to initialize application state")?);

    let server_state = Arc::clone(&state);
    let mut server = tokio::spawn(async move { webserver::start_server(server_state).await });

    tokio::select! {
        result = &mut server => {
            result.context("Webserver task panicked")??;
        }
        _ = tokio::signal::ctrl_c() => {
            logger::info(LogTag::System, "Shutdown requested, stopping...");
            webserver::shutdown();
            server.await.context("Webserver task panicked")??;
        }
    }

    logger::info(LogTag::System, "Goodbye");
    Ok(())
}
