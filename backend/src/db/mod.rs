//! PostgreSQL pool setup, migrations and liveness ping

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use secrecy::ExposeSecret;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::str::FromStr;
use tracing::{info, warn};

const APPLICATION_NAME: &str = "workout-service";

/// Parse the configured URL into connect options tagged with our application name
pub fn connect_options(config: &DatabaseConfig) -> Result<PgConnectOptions> {
    let options = PgConnectOptions::from_str(config.url.expose_secret())
        .context("invalid database URL")?
        .application_name(APPLICATION_NAME);
    Ok(options)
}

/// Create the connection pool
///
/// Acquiring a connection shares the per-query deadline so a saturated pool
/// surfaces as a timeout instead of a hang.
pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.query_timeout())
        .test_before_acquire(true)
        .connect_with(connect_options(config)?)
        .await
        .context("failed to connect to database")?;

    info!(max_connections = config.max_connections, "Database pool created");
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed");
    Ok(())
}

/// Round-trip a trivial query
pub async fn health_check(pool: &PgPool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!(error = %e, "Database health check failed");
            e.into()
        })
}
