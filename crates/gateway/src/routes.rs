//! Route configuration.

use axum::{middleware, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{admin_routes, auth_routes, health_routes, user_routes};
use crate::middleware::{auth_middleware, request_logger};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Everything here requires a valid bearer token
    let protected = Router::new()
        .merge(auth_routes())
        .merge(admin_routes())
        .merge(user_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    Router::new()
        .merge(health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(protected)
        .layer(middleware::from_fn_with_state(state.clone(), request_logger))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{body::Body, http::Request, http::StatusCode};
    use common::{AppConfig, JwtConfig};
    use domain::ServiceRegistry;
    use tower::ServiceExt;
    use user_service_lib::service::MockUserService;

    use crate::services::MockServiceContainer;

    fn state(services: MockServiceContainer) -> AppState {
        let registry = ServiceRegistry::new(&JwtConfig::with_secret("routes-test-secret")).unwrap();
        AppState::new(Arc::new(services), Arc::new(registry), AppConfig::default())
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let mut services = MockServiceContainer::new();
        services.expect_users().times(1).returning(|| {
            let mut users = MockUserService::new();
            users.expect_ping().returning(|| Ok(()));
            Arc::new(users)
        });

        let response = create_router(state(services))
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_protected_routes_reject_before_services() {
        let mut services = MockServiceContainer::new();
        services.expect_users().never();
        services.expect_admin().never();
        let app = create_router(state(services));

        for uri in ["/auth/whoami", "/users/6a2f41a3-c54c-fce8-32d2-0324e1c32e22"] {
            let response = app
                .clone()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = create_router(state(MockServiceContainer::new()))
            .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
