//! Token service - the only component that signs and reads tokens.
//!
//! Tokens are HS256 JWTs over a private payload. Callers must treat the token
//! string as opaque. Expiry is enforced against the injected [`Clock`] with no
//! leeway, so validation is a pure function of (token, secret, now). There is
//! no revocation: a token stays valid until it expires.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind as JwtErrorKind, Algorithm, DecodingKey, EncodingKey,
    Header, Validation,
};
use serde::{Deserialize, Serialize};

use common::{AppError, AppResult};

use crate::clock::{Clock, SystemClock};
use crate::constants::TOKEN_FAILURE_REASON;
use crate::token::TokenClaims;
use crate::user::UserRole;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Token issuance and validation.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait TokenService: Send + Sync {
    /// Sign claims into a bearer token.
    ///
    /// Fails with `BadRequest` when the subject is blank or the claims are
    /// already expired, and with `Internal` when signing fails.
    fn generate_token(&self, claims: &TokenClaims) -> AppResult<String>;

    /// Verify a bearer token and recover its claims.
    ///
    /// Every failure is `Unauthorized`; the `reason` metadata tells
    /// `expired`, `signature_mismatch` and `malformed` apart for logs.
    fn validate_token(&self, token: &str) -> AppResult<TokenClaims>;
}

/// Payload as it travels inside the token.
#[derive(Debug, Serialize, Deserialize)]
struct JwtPayload {
    sub: String,
    role: UserRole,
    exp: i64,
    iat: i64,
}

/// HMAC-SHA256 implementation of [`TokenService`].
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("algorithm", &ALGORITHM)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl JwtService {
    /// Create a token service backed by the system clock.
    pub fn new(secret: &str) -> AppResult<Self> {
        Self::with_clock(secret, Arc::new(SystemClock))
    }

    /// Create a token service reading time from `clock`.
    pub fn with_clock(secret: &str, clock: Arc<dyn Clock>) -> AppResult<Self> {
        if secret.trim().is_empty() {
            return Err(AppError::internal("JWT signing secret must not be empty")
                .with_meta("config", "jwt.secret"));
        }

        let mut validation = Validation::new(ALGORITHM);
        // Expiry is checked against our clock, without leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.required_spec_claims.clear();

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            clock,
        })
    }

    fn check_issuable(claims: &TokenClaims, now: DateTime<Utc>) -> AppResult<()> {
        if claims.subject_id().trim().is_empty() {
            return Err(AppError::bad_request("subject_id must not be empty")
                .with_meta("field", "subject_id"));
        }

        if claims.is_expired_at(now) {
            return Err(AppError::bad_request("expires_at must be in the future")
                .with_meta("field", "expires_at")
                .with_meta("expires_at", claims.expires_at().to_rfc3339()));
        }

        Ok(())
    }
}

impl TokenService for JwtService {
    fn generate_token(&self, claims: &TokenClaims) -> AppResult<String> {
        let now = self.clock.now();
        Self::check_issuable(claims, now)?;

        let payload = JwtPayload {
            sub: claims.subject_id().to_string(),
            role: claims.role(),
            exp: claims.expires_at().timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(ALGORITHM), &payload, &self.encoding_key)
            .map_err(|e| AppError::internal("Failed to sign token").with_cause(e))
    }

    fn validate_token(&self, token: &str) -> AppResult<TokenClaims> {
        // jsonwebtoken compares HMAC signatures in constant time.
        let payload = decode::<JwtPayload>(token, &self.decoding_key, &self.validation)
            .map_err(reject_decode_error)?
            .claims;

        let claims = payload_to_claims(payload)?;

        if claims.is_expired_at(self.clock.now()) {
            return Err(AppError::unauthorized("Token expired")
                .with_meta(TOKEN_FAILURE_REASON, "expired")
                .with_meta("expired_at", claims.expires_at().to_rfc3339()));
        }

        Ok(claims)
    }
}

fn payload_to_claims(payload: JwtPayload) -> AppResult<TokenClaims> {
    if payload.sub.trim().is_empty() {
        return Err(malformed("Token subject is empty"));
    }

    let expires_at = DateTime::from_timestamp(payload.exp, 0)
        .ok_or_else(|| malformed("Token expiry is out of range"))?;

    Ok(TokenClaims::new(payload.sub, payload.role, expires_at))
}

fn reject_decode_error(err: jsonwebtoken::errors::Error) -> AppError {
    let rejection = match err.kind() {
        JwtErrorKind::InvalidSignature => AppError::unauthorized("Token signature mismatch")
            .with_meta(TOKEN_FAILURE_REASON, "signature_mismatch"),
        _ => malformed("Token could not be decoded"),
    };
    rejection.with_cause(err)
}

fn malformed(message: &str) -> AppError {
    AppError::unauthorized(message).with_meta(TOKEN_FAILURE_REASON, "malformed")
}
