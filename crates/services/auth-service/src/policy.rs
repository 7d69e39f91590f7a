//! Token lifetimes per role.

use chrono::Duration;

use common::{AppError, AppResult, JwtConfig};
use domain::UserRole;

/// How long issued tokens live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    default_ttl: Duration,
    admin_ttl: Option<Duration>,
}

impl TokenPolicy {
    pub fn new(default_ttl: Duration, admin_ttl: Option<Duration>) -> Self {
        Self {
            default_ttl,
            admin_ttl,
        }
    }

    /// Build the policy from JWT settings; lifetimes must be positive.
    pub fn from_config(config: &JwtConfig) -> AppResult<Self> {
        let default_ttl = positive_seconds("jwt.expire_time_sec", config.expire_time_sec)?;
        let admin_ttl = config
            .admin_expire_time_sec
            .map(|secs| positive_seconds("jwt.admin_expire_time_sec", secs))
            .transpose()?;

        Ok(Self::new(default_ttl, admin_ttl))
    }

    /// Lifetime of a token issued for `role`.
    pub fn lifetime_for(&self, role: UserRole) -> Duration {
        match role {
            UserRole::Admin => self.admin_ttl.unwrap_or(self.default_ttl),
            UserRole::User => self.default_ttl,
        }
    }
}

fn positive_seconds(key: &str, secs: i64) -> AppResult<Duration> {
    Duration::try_seconds(secs)
        .filter(|ttl| *ttl > Duration::zero())
        .ok_or_else(|| {
            AppError::internal("Token lifetime must be a positive number of seconds")
                .with_meta("config", key)
                .with_meta("value", secs)
        })
}
