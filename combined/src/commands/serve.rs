//! Serve command - Start the HTTP server.

use common::Config;

use crate::cli::ServeArgs;

/// Execute the serve command
pub async fn execute(args: ServeArgs, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let registry = super::registry(&config.jwt)?;

    tracing::info!(app = %config.app.name, id = %config.app.id, "Starting server");
    gateway_lib::run(&args.host, args.port, config, registry).await
}
