//! Constants for keybench
//!
//! Defaults reproduce the fixed local target the benchmark was written
//! against. Every one of them can be overridden through configuration.

// ============================================================================
// DATABASE
// ============================================================================

/// Default PostgreSQL host
pub const DEFAULT_DB_HOST: &str = "localhost";

/// Default PostgreSQL port
pub const DEFAULT_DB_PORT: u16 = 5432;

/// Default database name
pub const DEFAULT_DB_NAME: &str = "postgres";

/// Default database user
pub const DEFAULT_DB_USER: &str = "postgres";

/// Default database password
pub const DEFAULT_DB_PASSWORD: &str = "topsecret";

/// Default connect timeout in seconds
pub const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// BENCHMARK
// ============================================================================

/// Rows inserted into each table per run
pub const DEFAULT_ITERATIONS: usize = 10_000;

/// Repetitions averaged in the final report
pub const DEFAULT_RUNS: u32 = 3;

/// Pause between the two insertion halves in milliseconds
pub const DEFAULT_PAUSE_MS: u64 = 1_000;

// ============================================================================
// ENVIRONMENT VARIABLES
// ============================================================================

pub const ENV_CONFIG_PATH: &str = "KEYBENCH_CONFIG";
pub const ENV_DB_HOST: &str = "KEYBENCH_DB_HOST";
pub const ENV_DB_PORT: &str = "KEYBENCH_DB_PORT";
pub const ENV_DB_NAME: &str = "KEYBENCH_DB_NAME";
pub const ENV_DB_USER: &str = "KEYBENCH_DB_USER";
pub const ENV_DB_PASSWORD: &str = "KEYBENCH_DB_PASSWORD";
pub const ENV_DB_TIMEOUT: &str = "KEYBENCH_DB_TIMEOUT";
pub const ENV_ITERATIONS: &str = "KEYBENCH_ITERATIONS";
pub const ENV_RUNS: &str = "KEYBENCH_RUNS";
pub const ENV_PAUSE_MS: &str = "KEYBENCH_PAUSE_MS";
pub const ENV_LOG_FORMAT: &str = "KEYBENCH_LOG_FORMAT";
