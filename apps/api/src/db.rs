use std::time::Duration;

use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Schema for the append-only results table. Idempotent.
pub const QUIZ_RESULTS_SCHEMA: &str = include_str!("../migrations/0001_create_quiz_results.sql");

/// Upper bound on waiting for a pooled connection, so an unreachable database
/// fails a write quickly instead of holding it open.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Creates a PostgreSQL connection pool without connecting.
///
/// Connections are opened on first use, so a database that is down at startup
/// only fails individual writes. Only a malformed URL is rejected here.
pub fn create_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect_lazy(database_url)?;

    info!("PostgreSQL pool configured (connections open on first use)");
    Ok(pool)
}

/// Creates the `quiz_results` table if it does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(QUIZ_RESULTS_SCHEMA).execute(pool).await?;
    info!("quiz_results table ready");
    Ok(())
}
