//! Unified error handling shared by every layer.
//!
//! Repository, domain and application code all fail with the same carrier,
//! [`AppError`], which binds a closed [`ErrorKind`] to a human message,
//! optional structured metadata and an optional wrapped cause. Only the HTTP
//! boundary turns it into a response, and only the kind and a public message
//! ever leave the process.

use std::collections::BTreeMap;
use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Boxed lower-level error kept for diagnostics.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Closed set of failure categories.
///
/// Each kind maps to exactly one HTTP status at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    Conflict,
    Internal,
}

impl ErrorKind {
    /// Get HTTP status code
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for client
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::Unauthorized => "UNAUTHORIZED",
            ErrorKind::Forbidden => "FORBIDDEN",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Conflict => "CONFLICT",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }

    /// Fixed client-facing message for kinds whose detail must stay server-side.
    fn public_message(self) -> Option<&'static str> {
        match self {
            ErrorKind::Unauthorized => Some("Invalid or expired token"),
            ErrorKind::Internal => Some("An internal error occurred"),
            ErrorKind::BadRequest
            | ErrorKind::Forbidden
            | ErrorKind::NotFound
            | ErrorKind::Conflict => None,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error carrier used across repository, domain and application layers.
///
/// Immutable once built: the fields are private and only readable through
/// accessors. Two errors compare equal when their kinds match; message,
/// metadata and cause are diagnostics, not control flow.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct AppError {
    kind: ErrorKind,
    message: String,
    metadata: Option<BTreeMap<String, String>>,
    #[source]
    cause: Option<BoxError>,
}

impl AppError {
    /// Build a carrier from all of its parts.
    pub fn new(
        kind: ErrorKind,
        message: impl Into<String>,
        metadata: Option<BTreeMap<String, String>>,
        cause: Option<BoxError>,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            metadata,
            cause,
        }
    }

    /// Attach a metadata entry while the error is being built.
    pub fn with_meta(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.metadata
            .get_or_insert_with(BTreeMap::new)
            .insert(key.into(), value.to_string());
        self
    }

    /// Wrap the lower-level error that triggered this one.
    pub fn with_cause<E>(mut self, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.cause = Some(Box::new(cause));
        self
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn metadata(&self) -> Option<&BTreeMap<String, String>> {
        self.metadata.as_ref()
    }

    /// Look up a single metadata value.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }

    pub fn cause(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.cause.as_deref()
    }

    /// Check the failure class.
    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        self.kind
            .public_message()
            .map(str::to_string)
            .unwrap_or_else(|| self.message.clone())
    }

    /// Record the full diagnostics server-side.
    fn log(&self) {
        match self.kind {
            ErrorKind::Internal => tracing::error!(
                code = self.code(),
                detail = %self.message,
                metadata = ?self.metadata,
                cause = ?self.cause,
                "Request failed with internal error"
            ),
            ErrorKind::Unauthorized | ErrorKind::Forbidden => tracing::warn!(
                code = self.code(),
                detail = %self.message,
                metadata = ?self.metadata,
                "Request rejected"
            ),
            ErrorKind::BadRequest | ErrorKind::NotFound | ErrorKind::Conflict => tracing::debug!(
                code = self.code(),
                detail = %self.message,
                "Request failed"
            ),
        }
    }
}

/// Convenience constructors
impl AppError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::BadRequest, msg, None, None)
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, msg, None, None)
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, msg, None, None)
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, msg, None, None)
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conflict, msg, None, None)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, msg, None, None)
    }
}

impl PartialEq for AppError {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl PartialEq<ErrorKind> for AppError {
    fn eq(&self, other: &ErrorKind) -> bool {
        self.kind == *other
    }
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: String,
    message: String,
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code().to_string(),
                message: self.user_message(),
            },
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Database Error Conversion
// =============================================================================

#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        use sea_orm::{DbErr, SqlErr};

        let (kind, message) = match (&err, err.sql_err()) {
            (_, Some(SqlErr::UniqueConstraintViolation(_))) => {
                (ErrorKind::Conflict, "Resource already exists")
            }
            (DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated, _) => {
                (ErrorKind::NotFound, "Resource not found")
            }
            _ => (ErrorKind::Internal, "Database error"),
        };

        AppError::new(kind, message, None, None).with_cause(err)
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or_else(|| AppError::not_found("Resource not found"))
    }
}
