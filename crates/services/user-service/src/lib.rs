//! User Service Library
//!
//! Users resource: SeaORM entity and migrations, repository, the
//! `UserService` use cases and their DTOs. Embedded by the gateway.

pub mod dto;
pub mod infra;
pub mod repository;
pub mod service;

use std::sync::Arc;

use tracing::info;

use common::{AppResult, DatabaseConfig};

use crate::infra::Database;
use crate::repository::UserStore;
use crate::service::{UserManager, UserService};

pub use dto::{CreateUserDto, UpdateUserDto, UserResponseDto};

/// Migration action type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrateAction {
    Up,
    Down,
    Status,
    Fresh,
}

/// Build the user service over an open database.
pub fn user_service(db: &Database) -> Arc<dyn UserService> {
    let repo = Arc::new(UserStore::new(db.get_connection()));
    Arc::new(UserManager::new(repo))
}

/// Run a migration action (for CLI commands).
///
/// Returns the migration status list for `Status`, empty otherwise.
pub async fn run_migrations(
    config: &DatabaseConfig,
    action: MigrateAction,
) -> AppResult<Vec<(String, bool)>> {
    let db = Database::connect_without_migrations(config).await?;

    match action {
        MigrateAction::Up => {
            db.run_migrations().await?;
            info!("Migrations applied successfully");
        }
        MigrateAction::Down => {
            db.rollback_migration().await?;
            info!("Rolled back last migration");
        }
        MigrateAction::Status => return Ok(db.migration_status().await?),
        MigrateAction::Fresh => {
            db.fresh_migrations().await?;
            info!("Database reset and migrations applied");
        }
    }

    Ok(Vec::new())
}
