use std::{fmt, time::Duration};

use sqlx::{
    PgPool,
    postgres::{PgConnectOptions, PgPoolOptions},
};
use tracing::info;

use crate::error::{CatalogError, Result};

/// Statistics about the connection pool
#[derive(Debug, Clone)]
pub struct PoolStats {
    pub size: u32,
    pub idle: u32,
    pub max_size: u32,
    pub min_idle: u32,
}

/// Pool sizing, normally taken from the server configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone)]
pub struct PostgresDatabase {
    pool: PgPool,
    options: PoolOptions,
}

impl fmt::Debug for PostgresDatabase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresDatabase")
            .field("pool_size", &self.pool.size())
            .field("idle_connections", &self.pool.num_idle())
            .field("max_connections", &self.options.max_connections)
            .field("min_connections", &self.options.min_connections)
            .finish()
    }
}

impl PostgresDatabase {
    pub async fn connect(
        connection_string: &str,
        options: PoolOptions,
    ) -> Result<Self> {
        let connect_options = connection_string
            .trim()
            .parse::<PgConnectOptions>()
            .map_err(|e| {
                CatalogError::Internal(format!(
                    "Invalid PostgreSQL connection string: {e}"
                ))
            })?;

        let pool = PgPoolOptions::new()
            .max_connections(options.max_connections)
            .min_connections(options.min_connections)
            .acquire_timeout(options.acquire_timeout)
            .max_lifetime(Duration::from_secs(1800))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect_with(connect_options)
            .await
            .map_err(|e| {
                CatalogError::Internal(format!("Database connection failed: {e}"))
            })?;

        info!(
            max_connections = options.max_connections,
            min_connections = options.min_connections,
            "database pool initialized"
        );

        Ok(Self { pool, options })
    }

    /// Wraps an existing pool, e.g. one handed out by `#[sqlx::test]`.
    /// Wraps an existing pool, reporting the sizing it was built with.
    pub fn from_pool(pool: PgPool) -> Self {
        let built = pool.options();
        let options = PoolOptions {
            max_connections: built.get_max_connections(),
            min_connections: built.get_min_connections(),
            acquire_timeout: built.get_acquire_timeout(),
        };
        Self { pool, options }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn pool_stats(&self) -> PoolStats {
        PoolStats {
            size: self.pool.size(),
            idle: self.pool.num_idle() as u32,
            max_size: self.options.max_connections,
            min_idle: self.options.min_connections,
        }
    }

    /// Apply the embedded migrations.
    pub async fn initialize_schema(&self) -> Result<()> {
        crate::MIGRATOR
            .run(&self.pool)
            .await
            .map_err(|e| CatalogError::Internal(format!("Migration failed: {e}")))?;
        info!("database schema is up to date");
        Ok(())
    }

    /// Round-trips a trivial query.
    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(|e| CatalogError::Internal(format!("Health check failed: {e}")))
    }
}
