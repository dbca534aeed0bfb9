//! Database Connection Module
//!
//! Builds a deadpool-postgres pool capped at a single connection. The
//! benchmark checks that connection out once and holds it for the whole run,
//! so every timed statement travels over the same session.

use deadpool_postgres::{Config, ManagerConfig, Object, Pool, PoolConfig, RecyclingMethod, Runtime};
use keybench_core::DatabaseConfig;
use tokio_postgres::NoTls;

use crate::error::BenchResult;

/// A checked-out connection. Dereferences to [`tokio_postgres::Client`].
pub type Connection = Object;

/// Application name reported to the server in `pg_stat_activity`.
const APPLICATION_NAME: &str = "keybench";

/// Create a single-connection pool from this configuration.
///
/// No connection is opened until [`DbClient::connect`] is awaited.
pub fn create_pool(config: &DatabaseConfig) -> BenchResult<Pool> {
    let mut cfg = Config::new();
    cfg.host = Some(config.host.clone());
    cfg.port = Some(config.port);
    cfg.dbname = Some(config.dbname.clone());
    cfg.user = Some(config.user.clone());
    cfg.password = Some(config.password.clone());
    cfg.application_name = Some(APPLICATION_NAME.to_string());
    cfg.connect_timeout = Some(config.connect_timeout);

    cfg.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });
    cfg.pool = Some(PoolConfig::new(1));

    let pool = cfg.create_pool(Some(Runtime::Tokio1), NoTls)?;
    Ok(pool)
}

/// Owner of the benchmark's connection pool.
#[derive(Clone)]
pub struct DbClient {
    pool: Pool,
}

impl DbClient {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    pub fn from_config(config: &DatabaseConfig) -> BenchResult<Self> {
        let pool = create_pool(config)?;
        Ok(Self::new(pool))
    }

    /// Maximum number of connections the pool will open.
    pub fn max_size(&self) -> usize {
        self.pool.status().max_size
    }

    /// Check out the connection.
    pub async fn connect(&self) -> BenchResult<Connection> {
        let conn = self.pool.get().await?;
        let row = conn.query_one("SHOW server_version", &[]).await?;
        let server_version: String = row.try_get(0)?;
        tracing::info!(%server_version, "Connected to PostgreSQL");
        Ok(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pool_is_capped_at_one_connection() {
        let db = DbClient::from_config(&DatabaseConfig::default()).expect("pool creation is lazy");
        assert_eq!(db.max_size(), 1);
    }
}
