//! keybench entry point.
//!
//! Takes no arguments. Configuration comes from the environment (see
//! `keybench_core::config`); the report is printed to stdout.

use keybench_core::BenchConfig;
use keybench_runner::{init_tracing, print_report, run_benchmark, BenchResult, DbClient, TelemetryConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> BenchResult<()> {
    init_tracing(&TelemetryConfig::from_env())?;

    let config = BenchConfig::load()?;
    tracing::info!(
        host = %config.database.host,
        port = config.database.port,
        dbname = %config.database.dbname,
        iterations = config.iterations,
        runs = config.runs,
        pause_ms = config.pause.as_millis() as u64,
        "Starting keybench"
    );

    let db = DbClient::from_config(&config.database)?;
    let mut conn = db.connect().await?;

    let report = run_benchmark(&mut conn, &config).await?;
    print_report(&report);

    tracing::info!("Benchmark complete");
    Ok(())
}
