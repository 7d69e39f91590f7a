//! Application state for dependency injection.

use std::sync::Arc;

use common::AppConfig;
use domain::ServiceRegistry;

use crate::services::ServiceContainer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<dyn ServiceContainer>,
    pub registry: Arc<ServiceRegistry>,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(
        services: Arc<dyn ServiceContainer>,
        registry: Arc<ServiceRegistry>,
        config: AppConfig,
    ) -> Self {
        Self {
            services,
            registry,
            config,
        }
    }
}
