use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use energy_cost::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let command = args.get_command();
    let config_path = args.config.as_deref();

    // The start command initializes tracing itself, once the configured
    // level and format are known
    if !matches!(command, cli::Commands::Start) {
        init_tracing("warn", "text");
    }

    match command {
        cli::Commands::Start => {
            commands::start::execute(config_path).await?;
        }
        cli::Commands::Test => {
            commands::test::execute(config_path)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(config_path)?,
        },
        cli::Commands::Version => {
            println!("Energy Cost v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
