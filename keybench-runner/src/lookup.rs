//! Lookup timer.

use std::time::{Duration, Instant};

use keybench_core::{KeyStrategy, LookupTiming, PrimaryKey, TableSpec};
use tokio_postgres::types::ToSql;
use tokio_postgres::{Client, Row};
use uuid::Uuid;

use crate::error::{BenchError, BenchResult};

fn read_key(row: &Row, strategy: KeyStrategy) -> Result<PrimaryKey, tokio_postgres::Error> {
    match strategy {
        KeyStrategy::AutoIncrement => row.try_get::<_, i32>(0).map(PrimaryKey::Serial),
        KeyStrategy::BinaryUuid => row.try_get::<_, Uuid>(0).map(PrimaryKey::Uuid),
        KeyStrategy::TextUuid => row.try_get::<_, String>(0).map(PrimaryKey::Text),
    }
}

fn key_param(key: &PrimaryKey) -> &(dyn ToSql + Sync) {
    match key {
        PrimaryKey::Serial(id) => id,
        PrimaryKey::Uuid(id) => id,
        PrimaryKey::Text(id) => id,
    }
}

/// Read every primary key in `table`, in whatever order the server returns.
pub async fn fetch_keys(client: &Client, table: &TableSpec) -> BenchResult<Vec<PrimaryKey>> {
    let rows = client.query(table.select_keys_sql().as_str(), &[]).await?;
    let keys = rows
        .iter()
        .map(|row| read_key(row, table.strategy()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(keys)
}

/// Run one prepared point lookup per key and return the elapsed time of the
/// loop. Fails with [`BenchError::MissingRow`] on the first key that finds
/// nothing.
pub async fn lookup_keys(
    client: &Client,
    table: &TableSpec,
    keys: &[PrimaryKey],
) -> BenchResult<Duration> {
    let statement = client.prepare(&table.lookup_sql()).await?;

    let started = Instant::now();
    for key in keys {
        let row = client.query_opt(&statement, &[key_param(key)]).await?;
        if row.is_none() {
            return Err(BenchError::MissingRow {
                table: table.name().to_string(),
                key: key.to_string(),
            });
        }
    }
    Ok(started.elapsed())
}

/// Look up every key in `table` by primary key, one statement per key.
///
/// Fetching the keys is not timed. Non-integer keys are normalised to text
/// before the timed loop. Every lookup must return a row.
pub async fn time_lookups(client: &Client, table: &TableSpec) -> BenchResult<LookupTiming> {
    let keys: Vec<PrimaryKey> = fetch_keys(client, table)
        .await?
        .into_iter()
        .map(PrimaryKey::normalize)
        .collect();
    if keys.is_empty() {
        return Err(BenchError::NoKeys {
            table: table.name().to_string(),
        });
    }

    let elapsed = lookup_keys(client, table, &keys).await?;

    println!(
        "Selected {} rows from {} in {:.2}s",
        keys.len(),
        table,
        elapsed.as_secs_f64()
    );
    Ok(LookupTiming {
        lookups: keys.len(),
        elapsed,
    })
}
