mod listen;
mod mappers;
mod read_ops;
mod types;
mod write_ops;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::info;

use crate::error::{BarberError, Result};

/// Schema applied by `barber init-db`.
pub const SCHEMA_SQL: &str = include_str!("../../schema.sql");

/// PostgreSQL-backed document store.
#[derive(Clone)]
pub struct BarberDb {
    pool: PgPool,
}

impl BarberDb {
    /// # Errors
    /// Returns [`BarberError::DatabaseError`] when the connection cannot be established.
    pub async fn new(database_url: &str) -> Result<Self> {
        Self::new_with_timeout(database_url, None).await
    }

    /// # Errors
    /// Returns [`BarberError::Timeout`] when no connection is acquired within
    /// `timeout_ms`, and [`BarberError::DatabaseError`] for other connect failures.
    pub async fn new_with_timeout(database_url: &str, timeout_ms: Option<u64>) -> Result<Self> {
        let connect_timeout = Duration::from_millis(timeout_ms.unwrap_or(3_000));
        let pool = PgPoolOptions::new()
            .max_connections(resolve_pool_max_connections())
            .acquire_timeout(connect_timeout)
            .connect(database_url)
            .await
            .map_err(|error| BarberError::database("Failed to connect to database", &error))?;

        info!("Connected to PostgreSQL barber database");
        Ok(Self { pool })
    }

    /// Create a new `BarberDb` with an existing pool (for testing).
    #[must_use]
    pub const fn new_with_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn resolve_pool_max_connections() -> u32 {
    resolve_pool_max_connections_from(|key| std::env::var(key).ok())
}

// Each live feed holds one listener connection on top of its fetches.
fn resolve_pool_max_connections_from<F>(env_lookup: F) -> u32
where
    F: Fn(&str) -> Option<String>,
{
    env_lookup("BARBER_DB_MAX_CONNECTIONS")
        .and_then(|v| v.parse::<u32>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(8)
}

#[cfg(test)]
mod tests {
    use super::{resolve_pool_max_connections_from, SCHEMA_SQL};

    #[test]
    fn pool_size_reads_env_override() {
        let lookup = |key: &str| (key == "BARBER_DB_MAX_CONNECTIONS").then(|| "3".to_string());
        assert_eq!(resolve_pool_max_connections_from(lookup), 3);
    }

    #[test]
    fn pool_size_ignores_zero_and_garbage() {
        assert_eq!(resolve_pool_max_connections_from(|_| Some("0".to_string())), 8);
        assert_eq!(resolve_pool_max_connections_from(|_| Some("many".to_string())), 8);
        assert_eq!(resolve_pool_max_connections_from(|_| None), 8);
    }

    #[test]
    fn schema_notifies_both_collections() {
        assert!(SCHEMA_SQL.contains("CREATE TABLE IF NOT EXISTS appointments"));
        assert!(SCHEMA_SQL.contains("CREATE TABLE IF NOT EXISTS chatbot_users"));
        assert!(SCHEMA_SQL.contains("pg_notify"));
    }
}
