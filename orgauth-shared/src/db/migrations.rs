/// Schema bootstrap
///
/// The SQL under `orgauth-shared/migrations/` is compiled into the binary.
/// At startup the server creates the database if it is missing and then
/// applies whatever migrations the database has not seen yet.

use sqlx::{
    migrate::{MigrateDatabase, MigrateError, Migrator},
    postgres::PgPool,
    Postgres,
};
use tracing::info;

static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Creates the database named in `database_url` unless it already exists
///
/// Returns whether it had to be created.
pub async fn ensure_database_exists(database_url: &str) -> Result<bool, sqlx::Error> {
    if Postgres::database_exists(database_url).await? {
        return Ok(false);
    }

    Postgres::create_database(database_url).await?;
    info!("Created missing database");
    Ok(true)
}

/// Applies pending migrations
///
/// # Errors
///
/// Fails if a migration errors or if an applied migration was edited after
/// the fact (checksum mismatch).
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!(embedded = MIGRATOR.iter().count(), "Schema is up to date");
    Ok(())
}
