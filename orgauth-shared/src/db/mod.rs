/// Database layer
///
/// - `pool`: connection pool for [`crate::store::PgStore`]
/// - `migrations`: embedded schema, applied at startup
///
/// # Example
///
/// ```no_run
/// use orgauth_shared::db::{migrations, pool};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let url = std::env::var("DATABASE_URL")?;
///
///     migrations::ensure_database_exists(&url).await?;
///     let pool = pool::create_pool(&url, 10).await?;
///     migrations::run_migrations(&pool).await?;
///     Ok(())
/// }
/// ```

pub mod migrations;
pub mod pool;
