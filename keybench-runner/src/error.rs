//! Error Types for the keybench runner
//!
//! The benchmark never recovers from a failure: every variant here ends the
//! run and is returned from `main`, which exits non-zero.

use keybench_core::ConfigError;
use thiserror::Error;

/// Result type alias for runner operations.
pub type BenchResult<T> = Result<T, BenchError>;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("Database error: {0}")]
    Database(#[source] tokio_postgres::Error),

    #[error("Connection pool error: {0}")]
    Pool(#[from] deadpool_postgres::PoolError),

    #[error("Failed to create pool: {0}")]
    CreatePool(#[from] deadpool_postgres::CreatePoolError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Row count mismatch in {table}: expected {expected}, found {actual}")]
    RowCountMismatch {
        table: String,
        expected: i64,
        actual: i64,
    },

    #[error("Lookup of key {key} in {table} returned no row")]
    MissingRow { table: String, key: String },

    #[error("Table {table} has no keys to look up")]
    NoKeys { table: String },

    #[error("Failed to initialize telemetry: {0}")]
    Telemetry(String),
}

/// Convert from tokio_postgres::Error to BenchError.
impl From<tokio_postgres::Error> for BenchError {
    fn from(err: tokio_postgres::Error) -> Self {
        tracing::error!("Database error: {:?}", err);
        BenchError::Database(err)
    }
}
