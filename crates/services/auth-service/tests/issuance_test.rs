//! Issuance through the public builder, checked by the registry's validator.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use common::{ErrorKind, JwtConfig};
use domain::{ManualClock, ServiceRegistry, UserRole, TOKEN_FAILURE_REASON};
use tokio_test::{assert_err, assert_ok};

use auth_service_lib::{admin_service, parse_role};

#[test]
fn cli_style_admin_token_round_trips_until_expiry() {
    let start: DateTime<Utc> = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
    let clock = Arc::new(ManualClock::new(start));
    let config = JwtConfig::with_secret("issuance-test-secret");
    let registry = ServiceRegistry::with_clock(&config, clock.clone()).unwrap();
    let admin = admin_service(&registry, &config).unwrap();

    let role = assert_ok!(parse_role("admin"));
    let response = assert_ok!(admin.issue_token("ops-1", role, Some(Duration::days(365))));

    let claims = assert_ok!(registry.token_service().validate_token(&response.access_token));
    assert_eq!(claims.subject_id(), "ops-1");
    assert_eq!(claims.role(), UserRole::Admin);
    assert_eq!(claims.expires_at(), response.expires_at);

    clock.advance(Duration::days(365));
    let err = assert_err!(registry.token_service().validate_token(&response.access_token));
    assert_eq!(err, ErrorKind::Unauthorized);
    assert_eq!(err.meta(TOKEN_FAILURE_REASON), Some("expired"));
}

#[test]
fn response_serializes_for_clients() {
    let config = JwtConfig::with_secret("issuance-test-secret");
    let registry = ServiceRegistry::new(&config).unwrap();
    let admin = admin_service(&registry, &config).unwrap();

    let response = admin.issue_token("u-1", UserRole::User, None).unwrap();
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["token_type"], "Bearer");
    assert_eq!(json["expires_in"], 3600);
    assert!(json["access_token"].as_str().unwrap().split('.').count() == 3);
}
