//! keybench Runner - PostgreSQL Primary-Key Latency Benchmark
//!
//! Compares single-row insert and point-lookup latency for three key
//! strategies: a `SERIAL` integer, a server-generated `UUID`, and a
//! server-generated UUID stored as `TEXT`.
//!
//! Everything runs sequentially over one connection. Any failure aborts the
//! run; there is no retry or partial reporting.

pub mod db;
pub mod driver;
pub mod error;
pub mod insert;
pub mod lookup;
pub mod report;
pub mod schema;
pub mod telemetry;

// Re-export commonly used types
pub use db::{create_pool, Connection, DbClient};
pub use driver::{run_benchmark, run_once, RunSample};
pub use error::{BenchError, BenchResult};
pub use insert::{position_ranges, time_insertion};
pub use lookup::{fetch_keys, lookup_keys, time_lookups};
pub use report::{print_report, render_report};
pub use schema::{clear_table, clear_tables, count_rows, ensure_tables, expect_row_count};
pub use telemetry::{init_tracing, TelemetryConfig};
