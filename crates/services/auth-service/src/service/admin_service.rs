//! Admin service - token issuance for operators.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::{AppError, AppResult};
use domain::{Clock, ServiceRegistry, TokenClaims, TokenService, UserRole, TOKEN_TYPE_BEARER};

use crate::policy::TokenPolicy;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Token response returned after issuance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 3600)]
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
}

/// Admin service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait AdminService: Send + Sync {
    /// Issue a token for `subject_id` holding `role`.
    ///
    /// `ttl` overrides the policy lifetime and must be positive.
    fn issue_token(
        &self,
        subject_id: &str,
        role: UserRole,
        ttl: Option<Duration>,
    ) -> AppResult<TokenResponse>;
}

/// Parse a role name supplied by an operator.
pub fn parse_role(input: &str) -> AppResult<UserRole> {
    input.parse()
}

/// Convert an operator-supplied lifetime in seconds.
pub fn ttl_from_seconds(secs: i64) -> AppResult<Duration> {
    Duration::try_seconds(secs).ok_or_else(|| {
        AppError::bad_request("Token lifetime is out of range").with_meta("ttl_seconds", secs)
    })
}

/// Concrete implementation of AdminService over the token service.
pub struct TokenIssuer {
    tokens: Arc<dyn TokenService>,
    clock: Arc<dyn Clock>,
    policy: TokenPolicy,
}

impl TokenIssuer {
    pub fn new(registry: &ServiceRegistry, policy: TokenPolicy) -> Self {
        Self {
            tokens: registry.token_service(),
            clock: registry.clock(),
            policy,
        }
    }
}

impl AdminService for TokenIssuer {
    fn issue_token(
        &self,
        subject_id: &str,
        role: UserRole,
        ttl: Option<Duration>,
    ) -> AppResult<TokenResponse> {
        let lifetime = match ttl {
            Some(ttl) if ttl <= Duration::zero() => {
                return Err(AppError::bad_request("Token lifetime must be positive")
                    .with_meta("ttl_seconds", ttl.num_seconds()));
            }
            Some(ttl) => ttl,
            None => self.policy.lifetime_for(role),
        };

        let now = self.clock.now();
        let expires_at = now.checked_add_signed(lifetime).ok_or_else(|| {
            AppError::bad_request("Token lifetime is out of range")
                .with_meta("ttl_seconds", lifetime.num_seconds())
        })?;
        let claims = TokenClaims::new(subject_id, role, expires_at);
        let access_token = self.tokens.generate_token(&claims)?;

        tracing::info!(
            subject_id = %claims.subject_id(),
            role = %role,
            expires_at = %claims.expires_at(),
            "Token issued"
        );

        Ok(TokenResponse {
            access_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: claims.expires_at().timestamp() - now.timestamp(),
            expires_at: claims.expires_at(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{ErrorKind, JwtConfig};
    use domain::{ManualClock, MockTokenService};

    const SECRET: &str = "test-secret-key-for-testing-only-32chars";

    fn start() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn issuer(config: &JwtConfig) -> (TokenIssuer, Arc<ServiceRegistry>) {
        let clock = Arc::new(ManualClock::new(start()));
        let registry = Arc::new(ServiceRegistry::with_clock(config, clock).unwrap());
        let policy = TokenPolicy::from_config(config).unwrap();
        (TokenIssuer::new(&registry, policy), registry)
    }

    #[test]
    fn test_issue_uses_role_lifetime() {
        let config = JwtConfig {
            admin_expire_time_sec: Some(600),
            ..JwtConfig::with_secret(SECRET)
        };
        let (issuer, registry) = issuer(&config);

        let response = issuer.issue_token("u-123", UserRole::Admin, None).unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 600);
        assert_eq!(response.expires_at, start() + Duration::seconds(600));

        let claims = registry
            .token_service()
            .validate_token(&response.access_token)
            .unwrap();
        assert_eq!(claims.subject_id(), "u-123");
        assert_eq!(claims.role(), UserRole::Admin);
    }

    #[test]
    fn test_issue_with_override() {
        let (issuer, _) = issuer(&JwtConfig::with_secret(SECRET));

        let response = issuer
            .issue_token("u-1", UserRole::User, Some(Duration::days(365)))
            .unwrap();

        assert_eq!(response.expires_in, 365 * 24 * 3600);
    }

    #[test]
    fn test_non_positive_override_is_rejected() {
        let (issuer, _) = issuer(&JwtConfig::with_secret(SECRET));

        for ttl in [Duration::zero(), Duration::seconds(-10)] {
            let err = issuer
                .issue_token("u-1", UserRole::User, Some(ttl))
                .unwrap_err();
            assert_eq!(err, ErrorKind::BadRequest);
        }
    }

    #[test]
    fn test_oversized_override_is_rejected() {
        let (issuer, _) = issuer(&JwtConfig::with_secret(SECRET));

        let err = issuer
            .issue_token(
                "u-1",
                UserRole::Admin,
                Some(Duration::seconds(10_000_000_000_000)),
            )
            .unwrap_err();
        assert_eq!(err, ErrorKind::BadRequest);
        assert_eq!(err.meta("ttl_seconds"), Some("10000000000000"));
    }

    #[test]
    fn test_ttl_from_seconds() {
        assert_eq!(ttl_from_seconds(60).unwrap(), Duration::seconds(60));

        let err = ttl_from_seconds(i64::MAX).unwrap_err();
        assert_eq!(err, ErrorKind::BadRequest);
        assert_eq!(err.meta("ttl_seconds"), Some(i64::MAX.to_string().as_str()));
    }

    #[test]
    fn test_blank_subject_is_rejected() {
        let (issuer, _) = issuer(&JwtConfig::with_secret(SECRET));

        let err = issuer.issue_token("  ", UserRole::Admin, None).unwrap_err();
        assert_eq!(err, ErrorKind::BadRequest);
    }

    #[test]
    fn test_signing_failure_propagates() {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_generate_token()
            .times(1)
            .returning(|_| Err(AppError::internal("Failed to sign token")));

        let registry = ServiceRegistry::from_parts(
            Arc::new(tokens),
            Arc::new(ManualClock::new(start())),
            Duration::seconds(3600),
        );
        let issuer = TokenIssuer::new(
            &registry,
            TokenPolicy::new(registry.default_expiry(), None),
        );

        let err = issuer.issue_token("u-1", UserRole::User, None).unwrap_err();
        assert_eq!(err, ErrorKind::Internal);
    }

    #[test]
    fn test_parse_role() {
        assert_eq!(parse_role("admin").unwrap(), UserRole::Admin);
        assert_eq!(parse_role("root").unwrap_err(), ErrorKind::BadRequest);
    }
}
