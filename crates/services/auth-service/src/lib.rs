//! Auth Service Library
//!
//! Administrative token issuance: role lifetimes (`TokenPolicy`) and the
//! `AdminService` that signs tokens through the shared `ServiceRegistry`.

pub mod policy;
pub mod service;

use std::sync::Arc;

use common::{AppResult, JwtConfig};
use domain::ServiceRegistry;

pub use policy::TokenPolicy;
pub use service::{parse_role, ttl_from_seconds, AdminService, TokenIssuer, TokenResponse};

/// Build the admin service from the registry and JWT settings.
pub fn admin_service(
    registry: &ServiceRegistry,
    config: &JwtConfig,
) -> AppResult<Arc<dyn AdminService>> {
    let policy = TokenPolicy::from_config(config)?;
    Ok(Arc::new(TokenIssuer::new(registry, policy)))
}
