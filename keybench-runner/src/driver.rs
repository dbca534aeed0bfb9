//! Benchmark driver: repeats the insert/lookup cycle and accumulates timings.

use keybench_core::{BenchConfig, BenchReport, InsertTiming, KeyStrategy, LookupTiming};
use tokio_postgres::Client;
use tracing::Instrument;

use crate::error::BenchResult;
use crate::insert::time_insertion;
use crate::lookup::time_lookups;
use crate::schema::{clear_tables, ensure_tables};

/// Measurements for one strategy within a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSample {
    pub strategy: KeyStrategy,
    pub insert: InsertTiming,
    pub lookup: LookupTiming,
}

/// One full cycle: empty every table, fill each in turn, then look each up.
pub async fn run_once(client: &mut Client, config: &BenchConfig) -> BenchResult<Vec<RunSample>> {
    clear_tables(client, &config.tables).await?;

    let mut inserts = Vec::with_capacity(config.tables.len());
    for table in &config.tables {
        let timing = time_insertion(client, table, config.iterations, config.pause)
            .instrument(tracing::info_span!("insert", table = %table))
            .await?;
        inserts.push(timing);
    }

    let mut samples = Vec::with_capacity(config.tables.len());
    for (table, insert) in config.tables.iter().zip(inserts) {
        let lookup = time_lookups(client, table)
            .instrument(tracing::info_span!("lookup", table = %table))
            .await?;
        samples.push(RunSample {
            strategy: table.strategy(),
            insert,
            lookup,
        });
    }
    Ok(samples)
}

/// Ensure the tables exist, then run `config.runs` cycles and return the
/// accumulated per-strategy totals.
pub async fn run_benchmark(client: &mut Client, config: &BenchConfig) -> BenchResult<BenchReport> {
    ensure_tables(client, &config.tables).await?;

    let mut report = BenchReport::new(config.iterations);
    for run in 1..=config.runs {
        let samples = run_once(client, config)
            .instrument(tracing::info_span!("run", run, of = config.runs))
            .await?;
        for sample in samples {
            tracing::info!(
                run,
                strategy = %sample.strategy,
                insert_secs = sample.insert.total().as_secs_f64(),
                select_secs = sample.lookup.elapsed.as_secs_f64(),
                "Run sample recorded"
            );
            report.record(sample.strategy, sample.insert, sample.lookup);
        }
        report.finish_run();
    }
    Ok(report)
}
