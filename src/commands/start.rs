use anyhow::Result;
use colored::Colorize;
use energy_cost::{config, init_tracing, server};
use std::path::Path;
use tracing::info;

/// Execute the start command
///
/// Loads configuration, initializes logging from it, then serves until a
/// shutdown signal arrives.
pub async fn execute(config_path: Option<&Path>) -> Result<()> {
    println!("{}", "Starting energy cost service...".green());

    let cfg = config::load_config(config_path)?;
    init_tracing(&cfg.server.log_level, &cfg.server.log_format);

    let source = config_path.unwrap_or(Path::new(config::DEFAULT_CONFIG_PATH));
    info!(config = %source.display(), "Configuration loaded");

    server::start_server(cfg).await
}
