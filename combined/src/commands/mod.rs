//! CLI command implementations.

pub mod migrate;
pub mod serve;
pub mod token;

use std::sync::Arc;

use common::{AppResult, JwtConfig};
use domain::{RegistryCell, ServiceRegistry};

static REGISTRY: RegistryCell = RegistryCell::new();

/// The process-wide service registry, built on first use.
pub fn registry(config: &JwtConfig) -> AppResult<Arc<ServiceRegistry>> {
    REGISTRY.get_or_try_init(|| ServiceRegistry::new(config))
}
