//! Table initialisation and housekeeping.

use keybench_core::TableSpec;
use tokio_postgres::Client;

use crate::error::{BenchError, BenchResult};

/// Create every table that does not exist yet. Existing tables are reused
/// untouched.
pub async fn ensure_tables(client: &Client, tables: &[TableSpec]) -> BenchResult<()> {
    for table in tables {
        client.batch_execute(&table.create_sql()).await?;
        tracing::debug!(table = %table, strategy = %table.strategy(), "Table ready");
    }
    Ok(())
}

pub async fn count_rows(client: &Client, table: &TableSpec) -> BenchResult<i64> {
    let row = client.query_one(table.count_sql().as_str(), &[]).await?;
    Ok(row.try_get(0)?)
}

/// Fail with [`BenchError::RowCountMismatch`] unless `table` holds exactly
/// `expected` rows.
pub async fn expect_row_count(client: &Client, table: &TableSpec, expected: i64) -> BenchResult<()> {
    let actual = count_rows(client, table).await?;
    if actual != expected {
        return Err(BenchError::RowCountMismatch {
            table: table.name().to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

/// Delete every row from `table`, leaving its key sequence where it was.
pub async fn clear_table(client: &Client, table: &TableSpec) -> BenchResult<u64> {
    let deleted = client.execute(table.clear_sql().as_str(), &[]).await?;
    expect_row_count(client, table, 0).await?;
    tracing::debug!(table = %table, deleted, "Table cleared");
    Ok(deleted)
}

pub async fn clear_tables(client: &Client, tables: &[TableSpec]) -> BenchResult<()> {
    for table in tables {
        clear_table(client, table).await?;
    }
    Ok(())
}
