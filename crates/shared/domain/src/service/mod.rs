//! Token services and the registry that owns them.

pub mod jwt_service;
pub mod registry;

pub use jwt_service::{JwtService, TokenService};
pub use registry::{RegistryCell, ServiceRegistry};

#[cfg(any(test, feature = "test-utils"))]
pub use jwt_service::MockTokenService;
