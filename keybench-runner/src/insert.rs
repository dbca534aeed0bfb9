//! Insertion timer.
//!
//! Rows go in one at a time, each in its own committed transaction, so every
//! insert pays the full cost of an independent write. The run is split in two
//! halves with an unmeasured pause between them; comparing the halves shows
//! whether index maintenance gets more expensive as the table grows.

use std::ops::Range;
use std::time::{Duration, Instant};

use keybench_core::{split_halves, ConfigError, InsertTiming, TableSpec};
use tokio_postgres::{Client, Statement};

use crate::error::BenchResult;
use crate::schema::expect_row_count;

/// Position ranges for the two halves of an `iterations`-row insert.
///
/// `position` is an `INT` column, so counts past `i32::MAX` are rejected.
pub fn position_ranges(iterations: usize) -> Result<(Range<i32>, Range<i32>), ConfigError> {
    let total = i32::try_from(iterations).map_err(|_| {
        ConfigError::invalid(
            "bench.iterations",
            format!("{} does not fit the INT position column", iterations),
        )
    })?;
    let (first, _) = split_halves(iterations);
    // first <= total, so this cannot fail once total fits.
    let first = first as i32;
    Ok((0..first, first..total))
}

/// Insert one row per position and return the elapsed wall-clock time.
async fn insert_batch(
    client: &mut Client,
    statement: &Statement,
    positions: Range<i32>,
) -> BenchResult<Duration> {
    let started = Instant::now();
    for position in positions {
        let tx = client.transaction().await?;
        tx.execute(statement, &[&position]).await?;
        tx.commit().await?;
    }
    Ok(started.elapsed())
}

/// Insert `iterations` rows into `table` in two timed halves separated by
/// `pause`, then check the table holds exactly `iterations` rows.
///
/// The table is expected to be empty on entry.
pub async fn time_insertion(
    client: &mut Client,
    table: &TableSpec,
    iterations: usize,
    pause: Duration,
) -> BenchResult<InsertTiming> {
    let (first, second) = position_ranges(iterations)?;
    let statement = client.prepare(&table.insert_sql()).await?;

    let first_half = insert_batch(client, &statement, first.clone()).await?;
    tracing::debug!(table = %table, rows = first.len(), elapsed_ms = first_half.as_millis() as u64, "First half inserted");

    if !pause.is_zero() {
        tokio::time::sleep(pause).await;
    }

    let second_half = insert_batch(client, &statement, second.clone()).await?;
    tracing::debug!(table = %table, rows = second.len(), elapsed_ms = second_half.as_millis() as u64, "Second half inserted");

    expect_row_count(client, table, iterations as i64).await?;

    let timing = InsertTiming {
        first_half,
        second_half,
    };
    println!(
        "Inserted {} rows into {} in {:.2}s",
        iterations,
        table,
        timing.total().as_secs_f64()
    );
    Ok(timing)
}
