//! PostgreSQL pool setup and migrations

use crate::config::DatabaseConfig;
use anyhow::Result;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Pool tuning that is not exposed through [`DatabaseConfig`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolTimeouts {
    pub acquire: Duration,
    pub idle: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolTimeouts {
    fn default() -> Self {
        Self {
            acquire: Duration::from_secs(30),
            idle: Duration::from_secs(600),
            max_lifetime: Duration::from_secs(1800),
        }
    }
}

/// Connect a pool sized by `config`
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    create_pool_with_timeouts(config, PoolTimeouts::default()).await
}

pub async fn create_pool_with_timeouts(
    config: &DatabaseConfig,
    timeouts: PoolTimeouts,
) -> Result<PgPool> {
    let connect_options = PgConnectOptions::from_str(&config.url)?.application_name("fittrack");
    let min_connections = min_connections(config.max_connections);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(min_connections)
        .acquire_timeout(timeouts.acquire)
        .idle_timeout(timeouts.idle)
        .max_lifetime(timeouts.max_lifetime)
        .test_before_acquire(true)
        .connect_with(connect_options)
        .await?;

    info!(
        max = config.max_connections,
        min = min_connections,
        "Database pool created"
    );
    Ok(pool)
}

/// Keep a couple of warm connections, never more than the pool allows
fn min_connections(max_connections: u32) -> u32 {
    max_connections.min(2)
}

/// Apply pending migrations from `backend/migrations`
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed");
    Ok(())
}

/// Round-trip a trivial query
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!(error = %e, "Database health check failed");
            e
        })
}
