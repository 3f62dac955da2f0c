//! Database migration command.

use authgate_core::config::{AppConfig, UserDirectoryProvider};
use authgate_core::error::AppError;
use authgate_database::DatabasePool;
use authgate_database::migration::run_migrations;

use crate::output;

/// Apply all pending migrations to the configured PostgreSQL database
pub async fn execute(config: &AppConfig) -> Result<(), AppError> {
    if config.database.provider != UserDirectoryProvider::Postgres {
        output::print_warning(&format!(
            "User directory provider is '{}'; nothing to migrate.",
            config.database.provider
        ));
        return Ok(());
    }

    let pool = DatabasePool::connect(&config.database).await?;

    println!("Running database migrations...");
    run_migrations(pool.pool()).await?;
    output::print_success("All migrations applied successfully.");

    Ok(())
}
