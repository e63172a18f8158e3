/// PostgreSQL connection pool
///
/// Requests hold a connection for one query, or for the single transaction
/// a registration needs, so only the pool size is configurable. Waiting for
/// a connection is capped at [`ACQUIRE_TIMEOUT`]; a saturated pool surfaces
/// as a store error rather than a hung request.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::info;

/// Longest a request waits for a free connection
pub const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Idle connections above the minimum are dropped after this long
const IDLE_TIMEOUT: Duration = Duration::from_secs(10 * 60);

/// Connects to `url` with at most `max_connections` connections
///
/// The pool is pinged once before it is returned, so a wrong password or an
/// unreachable host fails startup instead of the first request.
pub async fn create_pool(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections.max(1))
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .idle_timeout(IDLE_TIMEOUT)
        .connect(url)
        .await?;

    health_check(&pool).await?;

    info!(max_connections, "Connected to PostgreSQL");
    Ok(pool)
}

/// Round-trips a trivial query
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Waits for checked-out connections to come back, then closes the pool
pub async fn close_pool(pool: PgPool) {
    pool.close().await;
    info!("PostgreSQL pool closed");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_malformed_url_fails_without_connecting() {
        let result = create_pool("definitely not a database url", 1).await;
        assert!(matches!(result, Err(sqlx::Error::Configuration(_))));
    }
}
