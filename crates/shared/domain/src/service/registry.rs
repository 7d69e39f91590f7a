//! Process-wide registry of token services.
//!
//! The registry is built once from [`JwtConfig`] at startup and shared by
//! reference afterwards. Bad configuration fails construction, so nothing is
//! ever served with an empty signing secret.

use std::sync::Arc;

use chrono::Duration;
use once_cell::sync::OnceCell;

use common::{AppError, AppResult, JwtConfig};

use crate::clock::{Clock, SystemClock};
use crate::service::jwt_service::{JwtService, TokenService};

/// Holds the token service together with its clock and default lifetime.
pub struct ServiceRegistry {
    token_service: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
    default_expiry: Duration,
}

impl std::fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("default_expiry_sec", &self.default_expiry.num_seconds())
            .finish_non_exhaustive()
    }
}

impl ServiceRegistry {
    /// Build the registry on the system clock.
    pub fn new(config: &JwtConfig) -> AppResult<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build the registry on an explicit clock.
    pub fn with_clock(config: &JwtConfig, clock: Arc<dyn Clock>) -> AppResult<Self> {
        let default_expiry = Duration::try_seconds(config.expire_time_sec)
            .filter(|expiry| *expiry > Duration::zero())
            .ok_or_else(|| {
                AppError::internal("JWT expiry must be a positive number of seconds")
                    .with_meta("config", "jwt.expire_time_sec")
                    .with_meta("value", config.expire_time_sec)
            })?;

        let token_service = JwtService::with_clock(&config.secret, clock.clone())?;

        Ok(Self {
            token_service: Arc::new(token_service),
            clock,
            default_expiry,
        })
    }

    /// Assemble a registry from existing parts, e.g. a mocked token service.
    pub fn from_parts(
        token_service: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
        default_expiry: Duration,
    ) -> Self {
        Self {
            token_service,
            clock,
            default_expiry,
        }
    }

    pub fn token_service(&self) -> Arc<dyn TokenService> {
        self.token_service.clone()
    }

    pub fn clock(&self) -> Arc<dyn Clock> {
        self.clock.clone()
    }

    /// Lifetime applied when issuance does not ask for one.
    pub fn default_expiry(&self) -> Duration {
        self.default_expiry
    }
}

/// Exactly-once holder for the shared [`ServiceRegistry`].
///
/// Concurrent first callers block until a single initializer finishes. A
/// failed initialization leaves the cell empty.
#[derive(Debug, Default)]
pub struct RegistryCell {
    cell: OnceCell<Arc<ServiceRegistry>>,
}

impl RegistryCell {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Return the registry, building it with `init` if this is the first call.
    pub fn get_or_try_init<F>(&self, init: F) -> AppResult<Arc<ServiceRegistry>>
    where
        F: FnOnce() -> AppResult<ServiceRegistry>,
    {
        self.cell
            .get_or_try_init(|| init().map(Arc::new))
            .map(Arc::clone)
    }

    pub fn get(&self) -> Option<Arc<ServiceRegistry>> {
        self.cell.get().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::jwt_service::MockTokenService;
    use crate::token::TokenClaims;
    use crate::user::UserRole;
    use common::ErrorKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    #[test]
    fn test_empty_secret_fails_fast() {
        let err = ServiceRegistry::new(&JwtConfig::default()).unwrap_err();
        assert_eq!(err, ErrorKind::Internal);
        assert_eq!(err.meta("config"), Some("jwt.secret"));
    }

    #[test]
    fn test_non_positive_expiry_fails_fast() {
        for expire_time_sec in [0, -5, i64::MAX] {
            let config = JwtConfig {
                expire_time_sec,
                ..JwtConfig::with_secret(SECRET)
            };
            let err = ServiceRegistry::new(&config).unwrap_err();
            assert_eq!(err, ErrorKind::Internal);
            assert_eq!(err.meta("config"), Some("jwt.expire_time_sec"));
        }
    }

    #[test]
    fn test_registry_issues_and_validates() {
        let registry = ServiceRegistry::new(&JwtConfig::with_secret(SECRET)).unwrap();
        assert_eq!(registry.default_expiry(), Duration::seconds(3600));

        let service = registry.token_service();
        let claims = TokenClaims::new(
            "u-1",
            UserRole::User,
            registry.clock().now() + registry.default_expiry(),
        );
        let token = service.generate_token(&claims).unwrap();

        assert_eq!(service.validate_token(&token).unwrap(), claims);
    }

    #[test]
    fn test_from_parts_uses_given_service() {
        let mut mock = MockTokenService::new();
        mock.expect_generate_token()
            .times(1)
            .returning(|_| Ok("mock-token".to_string()));

        let registry =
            ServiceRegistry::from_parts(Arc::new(mock), Arc::new(SystemClock), Duration::seconds(60));
        let claims = TokenClaims::new("u-1", UserRole::User, registry.clock().now());

        assert_eq!(
            registry.token_service().generate_token(&claims).unwrap(),
            "mock-token"
        );
    }

    #[test]
    fn test_cell_initializes_once_under_contention() {
        let cell = RegistryCell::new();
        let builds = AtomicUsize::new(0);
        let config = JwtConfig::with_secret(SECRET);

        let registries: Vec<Arc<ServiceRegistry>> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..16)
                .map(|_| {
                    scope.spawn(|| {
                        cell.get_or_try_init(|| {
                            builds.fetch_add(1, Ordering::SeqCst);
                            ServiceRegistry::new(&config)
                        })
                        .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(builds.load(Ordering::SeqCst), 1);
        assert!(registries.iter().all(|r| Arc::ptr_eq(r, &registries[0])));
    }

    #[test]
    fn test_cell_stays_empty_after_failed_init() {
        let cell = RegistryCell::new();

        let err = cell
            .get_or_try_init(|| ServiceRegistry::new(&JwtConfig::default()))
            .unwrap_err();
        assert_eq!(err, ErrorKind::Internal);
        assert!(cell.get().is_none());

        let registry = cell
            .get_or_try_init(|| ServiceRegistry::new(&JwtConfig::with_secret(SECRET)))
            .unwrap();
        assert!(Arc::ptr_eq(&registry, &cell.get().unwrap()));
    }
}
