//! Migrate command - Database migration management.

use common::{AppResult, Config};
use user_service_lib::MigrateAction as Action;

use crate::cli::{MigrateAction, MigrateArgs};

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let action = match args.action {
        MigrateAction::Up => Action::Up,
        MigrateAction::Down => Action::Down,
        MigrateAction::Status => Action::Status,
        MigrateAction::Fresh => {
            tracing::warn!("Resetting database and running all migrations...");
            Action::Fresh
        }
    };

    let status = user_service_lib::run_migrations(&config.db, action).await?;
    for (name, applied) in status {
        let marker = if applied { "[x]" } else { "[ ]" };
        println!("{} {}", marker, name);
    }

    Ok(())
}
