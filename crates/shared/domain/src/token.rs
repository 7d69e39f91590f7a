//! Token claims: who the bearer is, what role they hold, and until when.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::user::UserRole;

/// Identity and authorization payload carried by a signed token.
///
/// Only constructible through [`TokenClaims::new`], so `expires_at` always
/// sits on a whole second.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenClaims {
    /// Opaque principal identifier (a UUID string for users)
    subject_id: String,
    role: UserRole,
    /// The token is invalid at or after this instant
    expires_at: DateTime<Utc>,
}

impl TokenClaims {
    /// Build claims, truncating `expires_at` to whole seconds.
    ///
    /// Tokens carry expiry at second resolution, so truncating here keeps the
    /// claims recovered from a token equal to the ones it was issued from.
    pub fn new(subject_id: impl Into<String>, role: UserRole, expires_at: DateTime<Utc>) -> Self {
        Self {
            subject_id: subject_id.into(),
            role,
            expires_at: truncate_to_seconds(expires_at),
        }
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the claims are expired at `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Seconds left until expiry, zero once expired.
    pub fn remaining_seconds(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

fn truncate_to_seconds(at: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(at.timestamp(), 0).unwrap_or(at)
}
