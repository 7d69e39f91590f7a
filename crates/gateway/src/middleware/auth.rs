//! Authentication middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{TokenClaims, UserRole, TOKEN_FAILURE_REASON};

use crate::state::AppState;

/// Current authenticated principal extracted from the bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub subject_id: String,
    pub role: UserRole,
    pub expires_at: DateTime<Utc>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Whether the principal is the user with `id`.
    pub fn is_user(&self, id: Uuid) -> bool {
        Uuid::parse_str(&self.subject_id)
            .map(|subject| subject == id)
            .unwrap_or(false)
    }
}

impl From<TokenClaims> for CurrentUser {
    fn from(claims: TokenClaims) -> Self {
        Self {
            subject_id: claims.subject_id().to_string(),
            role: claims.role(),
            expires_at: claims.expires_at(),
        }
    }
}

/// Check if user has admin privileges.
pub fn require_admin(user: &CurrentUser) -> AppResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        Err(AppError::forbidden("Admin role required").with_meta("subject_id", &user.subject_id))
    }
}

/// Users may act on their own record; admins on any.
pub fn require_self_or_admin(user: &CurrentUser, id: Uuid) -> AppResult<()> {
    if user.is_user(id) {
        Ok(())
    } else {
        require_admin(user)
    }
}

/// Validates the bearer token and stores the [`CurrentUser`] in the request.
pub async fn auth_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or_else(|| {
        AppError::unauthorized("Missing or malformed bearer token")
            .with_meta(TOKEN_FAILURE_REASON, "missing")
    })?;

    let claims = state.registry.token_service().validate_token(bearer.token())?;

    request.extensions_mut().insert(CurrentUser::from(claims));

    Ok(next.run(request).await)
}
