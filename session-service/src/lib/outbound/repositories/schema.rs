//! Table lifecycle for the credential and session token store.
//!
//! Migrations are reversible so that teardown on shutdown leaves the
//! migration history consistent with the tables present.

use sqlx::migrate::MigrateError;
use sqlx::migrate::Migrator;
use sqlx::PgPool;

pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Create the `credentials` and `session_tokens` tables if missing.
pub async fn create_tables(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");
    Ok(())
}

/// Drop every table created by `create_tables`.
pub async fn drop_tables(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.undo(pool, 0).await?;
    tracing::info!(database = "postgresql", "Database tables dropped");
    Ok(())
}
