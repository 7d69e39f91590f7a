//! Admin handlers.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use auth_service_lib::{parse_role, ttl_from_seconds, TokenResponse};
use common::AppResult;

use crate::extractors::ValidatedJson;
use crate::middleware::{require_admin, CurrentUser};
use crate::state::AppState;

/// Token issuance request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct IssueTokenRequest {
    /// Principal the token is issued for
    #[validate(length(min = 1, message = "subject_id cannot be empty"))]
    #[schema(example = "3f1c2a9e-8d4b-4a57-9a3e-0f7c1b2d4e6a")]
    pub subject_id: String,
    #[schema(example = "user")]
    pub role: String,
    /// Lifetime in seconds; the role default when absent
    #[validate(range(min = 1, message = "ttl_seconds must be positive"))]
    #[schema(example = 3600)]
    pub ttl_seconds: Option<i64>,
}

pub fn admin_routes() -> Router<AppState> {
    Router::new().route("/admin/tokens", post(issue_token))
}

/// Issue a signed token (admin only)
#[utoipa::path(
    post,
    path = "/admin/tokens",
    tag = "Admin",
    security(("bearer_auth" = [])),
    request_body = IssueTokenRequest,
    responses(
        (status = 201, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid subject, role or lifetime"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - Admin only")
    )
)]
pub async fn issue_token(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<IssueTokenRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    require_admin(&current_user)?;

    let role = parse_role(&payload.role)?;
    let ttl = payload.ttl_seconds.map(ttl_from_seconds).transpose()?;
    let response = state
        .services
        .admin()
        .issue_token(&payload.subject_id, role, ttl)?;

    tracing::info!(
        issued_by = %current_user.subject_id,
        subject_id = %payload.subject_id,
        role = %role,
        "Admin issued token"
    );

    Ok((StatusCode::CREATED, Json(response)))
}
