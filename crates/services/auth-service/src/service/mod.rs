//! Token issuance use cases.

mod admin_service;

pub use admin_service::{parse_role, ttl_from_seconds, AdminService, TokenIssuer, TokenResponse};

#[cfg(any(test, feature = "test-utils"))]
pub use admin_service::MockAdminService;
