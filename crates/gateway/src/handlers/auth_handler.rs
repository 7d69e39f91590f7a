//! Token introspection for the authenticated caller.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::AppResult;
use domain::UserRole;

use crate::middleware::CurrentUser;
use crate::state::AppState;

/// Claims of the presented token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct WhoAmIResponse {
    #[schema(example = "3f1c2a9e-8d4b-4a57-9a3e-0f7c1b2d4e6a")]
    pub subject_id: String,
    pub role: UserRole,
    pub expires_at: DateTime<Utc>,
    /// Seconds until the token expires
    pub expires_in: i64,
}

pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/auth/whoami", get(whoami))
}

/// Describe the bearer token used for this request
#[utoipa::path(
    get,
    path = "/auth/whoami",
    tag = "Authentication",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token claims", body = WhoAmIResponse),
        (status = 401, description = "Missing, invalid or expired token")
    )
)]
pub async fn whoami(
    Extension(current_user): Extension<CurrentUser>,
    State(state): State<AppState>,
) -> AppResult<Json<WhoAmIResponse>> {
    let now = state.registry.clock().now();
    let expires_in = (current_user.expires_at - now).num_seconds().max(0);

    Ok(Json(WhoAmIResponse {
        subject_id: current_user.subject_id,
        role: current_user.role,
        expires_at: current_user.expires_at,
        expires_in,
    }))
}
