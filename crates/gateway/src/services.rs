//! Service container - the application services handlers talk to.

use std::sync::Arc;

use auth_service_lib::AdminService;
use common::{AppResult, JwtConfig};
use domain::ServiceRegistry;
use user_service_lib::infra::Database;
use user_service_lib::service::UserService;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Service container trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    /// Get user service
    fn users(&self) -> Arc<dyn UserService>;

    /// Get admin (token issuance) service
    fn admin(&self) -> Arc<dyn AdminService>;
}

/// Concrete implementation of ServiceContainer
pub struct Services {
    user_service: Arc<dyn UserService>,
    admin_service: Arc<dyn AdminService>,
}

impl Services {
    pub fn new(user_service: Arc<dyn UserService>, admin_service: Arc<dyn AdminService>) -> Self {
        Self {
            user_service,
            admin_service,
        }
    }

    /// Wire the services over an open database and the token registry.
    pub fn from_database(
        db: &Database,
        registry: &ServiceRegistry,
        jwt: &JwtConfig,
    ) -> AppResult<Self> {
        Ok(Self::new(
            user_service_lib::user_service(db),
            auth_service_lib::admin_service(registry, jwt)?,
        ))
    }
}

impl ServiceContainer for Services {
    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn admin(&self) -> Arc<dyn AdminService> {
        self.admin_service.clone()
    }
}
