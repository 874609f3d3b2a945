//! Postgres persistence layer for the health-alerting core.
//!
//! Two durable collections, `vitals_samples` (append-only) and `alerts`
//! (append + status update), plus the `alert_cooldowns` dedup mapping and
//! the `sms_delivery_log` per-attempt record. Repositories are zero-sized
//! structs whose async methods take `&PgPool` as the first argument.

pub mod models;
pub mod repositories;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Shared connection pool alias.
pub type DbPool = PgPool;

/// Default maximum pool size when `DATABASE_MAX_CONNECTIONS` is not set.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Connect to the database at `database_url`.
pub async fn connect(database_url: &str) -> Result<DbPool, sqlx::Error> {
    let max_connections = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_CONNECTIONS);

    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    tracing::info!(max_connections, "Database pool connected");
    Ok(pool)
}

/// Run pending migrations from the workspace `migrations/` directory.
pub async fn migrate(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

/// Cheap connectivity probe.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
