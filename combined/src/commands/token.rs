//! Token command - Issue a signed token from the command line.

use uuid::Uuid;

use auth_service_lib::{admin_service, parse_role, ttl_from_seconds, TokenResponse};
use common::{AppResult, Config};
use domain::ServiceRegistry;

use crate::cli::TokenArgs;

/// Execute the token command
pub async fn execute(args: TokenArgs, config: Config) -> AppResult<()> {
    let registry = super::registry(&config.jwt)?;
    let response = issue(&registry, &config, args)?;

    println!("Generated token: {}", response.access_token);
    Ok(())
}

fn issue(registry: &ServiceRegistry, config: &Config, args: TokenArgs) -> AppResult<TokenResponse> {
    let role = parse_role(&args.role)?;
    let subject = args
        .subject
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let ttl = ttl_from_seconds(args.expire_sec)?;

    admin_service(registry, &config.jwt)?.issue_token(&subject, role, Some(ttl))
}
