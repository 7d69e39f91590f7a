//! API Gateway Library
//!
//! The HTTP surface: bearer authentication, request logging, user and admin
//! endpoints, health and OpenAPI docs.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod services;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use common::Config;
use domain::ServiceRegistry;
use user_service_lib::infra::Database;

use crate::routes::create_router;
use crate::services::Services;
use crate::state::AppState;

/// Connect the database, wire the services and serve until Ctrl+C.
pub async fn run(
    host: &str,
    port: u16,
    config: Config,
    registry: Arc<ServiceRegistry>,
) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::connect(&config.db).await?;
    let services = Services::from_database(&db, &registry, &config.jwt)?;

    let state = AppState::new(Arc::new(services), registry, config.app.clone());
    let app = create_router(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!(app = %config.app.name, "Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
