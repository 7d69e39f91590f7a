//! sample-api - Application entry point
//!
//! CLI-based entry point that dispatches to the serve, migrate and token
//! commands.

mod cli;
mod commands;

use clap::Parser;

use common::{telemetry::init_tracing, Config};

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configuration first: it loads `.env`, which may set LOG_LEVEL
    let config = Config::from_env();
    init_tracing(&config.app.name, cli.verbose);
    tracing::debug!(?config, "Configuration loaded");

    let result: Result<(), Box<dyn std::error::Error>> = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, config).await,
        Commands::Migrate(args) => commands::migrate::execute(args, config)
            .await
            .map_err(Into::into),
        Commands::Token(args) => commands::token::execute(args, config)
            .await
            .map_err(Into::into),
    };

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}
