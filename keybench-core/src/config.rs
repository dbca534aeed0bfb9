//! Benchmark configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file named by
//! `KEYBENCH_CONFIG`, then individual environment variables. The defaults
//! reproduce the fixed target the benchmark has always run against.
//!
//! Environment variables:
//! - `KEYBENCH_CONFIG`: Path to a TOML file (optional)
//! - `KEYBENCH_DB_HOST`, `KEYBENCH_DB_PORT`, `KEYBENCH_DB_NAME`,
//!   `KEYBENCH_DB_USER`, `KEYBENCH_DB_PASSWORD`: Connection target
//! - `KEYBENCH_DB_TIMEOUT`: Connect timeout in seconds (default: 30)
//! - `KEYBENCH_ITERATIONS`: Rows inserted and looked up per table per run (default: 10000)
//! - `KEYBENCH_RUNS`: Number of repetitions to average over (default: 3)
//! - `KEYBENCH_PAUSE_MS`: Pause between the two insertion halves (default: 1000)

use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::*;
use crate::error::ConfigError;
use crate::strategy::{KeyStrategy, TableSpec};

// ============================================================================
// DATABASE CONFIGURATION
// ============================================================================

/// PostgreSQL connection target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// PostgreSQL host
    pub host: String,
    /// PostgreSQL port
    pub port: u16,
    /// Database name
    pub dbname: String,
    /// Database user
    pub user: String,
    /// Database password
    pub password: String,
    /// Connection timeout
    pub connect_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_DB_HOST.to_string(),
            port: DEFAULT_DB_PORT,
            dbname: DEFAULT_DB_NAME.to_string(),
            user: DEFAULT_DB_USER.to_string(),
            password: DEFAULT_DB_PASSWORD.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_DB_TIMEOUT_SECS),
        }
    }
}

// ============================================================================
// BENCHMARK CONFIGURATION
// ============================================================================

/// Everything one benchmark invocation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub database: DatabaseConfig,
    /// Rows inserted into (and looked up from) each table per run.
    pub iterations: usize,
    /// Repetitions averaged in the final report.
    pub runs: u32,
    /// Unmeasured pause between the two insertion halves.
    pub pause: Duration,
    /// One table per strategy, in [`KeyStrategy::ALL`] order.
    pub tables: Vec<TableSpec>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            iterations: DEFAULT_ITERATIONS,
            runs: DEFAULT_RUNS,
            pause: Duration::from_millis(DEFAULT_PAUSE_MS),
            tables: KeyStrategy::ALL
                .iter()
                .copied()
                .map(TableSpec::with_default_name)
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    database: Option<FileDatabase>,
    bench: Option<FileBench>,
    tables: Option<FileTables>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileDatabase {
    host: Option<String>,
    port: Option<u16>,
    dbname: Option<String>,
    user: Option<String>,
    password: Option<String>,
    connect_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileBench {
    iterations: Option<usize>,
    runs: Option<u32>,
    pause_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileTables {
    auto_increment: Option<String>,
    uuid: Option<String>,
    uuid_str: Option<String>,
}

impl BenchConfig {
    /// Load from the process environment and validate.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(ENV_CONFIG_PATH) {
            Some(path) if !path.trim().is_empty() => Self::from_path(Path::new(path.trim()))?,
            _ => Self::default(),
        };
        config.apply_env(&lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file on top of the defaults. Does not validate.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse TOML text on top of the defaults. Does not validate.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(contents)?;
        let mut config = Self::default();

        if let Some(db) = file.database {
            let target = &mut config.database;
            if let Some(host) = db.host {
                target.host = host;
            }
            if let Some(port) = db.port {
                target.port = port;
            }
            if let Some(dbname) = db.dbname {
                target.dbname = dbname;
            }
            if let Some(user) = db.user {
                target.user = user;
            }
            if let Some(password) = db.password {
                target.password = password;
            }
            if let Some(secs) = db.connect_timeout_secs {
                target.connect_timeout = Duration::from_secs(secs);
            }
        }

        if let Some(bench) = file.bench {
            if let Some(iterations) = bench.iterations {
                config.iterations = iterations;
            }
            if let Some(runs) = bench.runs {
                config.runs = runs;
            }
            if let Some(pause_ms) = bench.pause_ms {
                config.pause = Duration::from_millis(pause_ms);
            }
        }

        if let Some(tables) = file.tables {
            let names = [tables.auto_increment, tables.uuid, tables.uuid_str];
            let mut specs = Vec::with_capacity(names.len());
            for (strategy, name) in KeyStrategy::ALL.iter().copied().zip(names) {
                let spec = match name {
                    Some(name) => TableSpec::new(strategy, name)?,
                    None => TableSpec::with_default_name(strategy),
                };
                specs.push(spec);
            }
            config.tables = specs;
        }

        Ok(config)
    }

    fn apply_env<F>(&mut self, lookup: &F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_DB_HOST) {
            self.database.host = host;
        }
        if let Some(port) = parse_env(lookup, ENV_DB_PORT)? {
            self.database.port = port;
        }
        if let Some(dbname) = lookup(ENV_DB_NAME) {
            self.database.dbname = dbname;
        }
        if let Some(user) = lookup(ENV_DB_USER) {
            self.database.user = user;
        }
        if let Some(password) = lookup(ENV_DB_PASSWORD) {
            self.database.password = password;
        }
        if let Some(secs) = parse_env::<u64, _>(lookup, ENV_DB_TIMEOUT)? {
            self.database.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(iterations) = parse_env(lookup, ENV_ITERATIONS)? {
            self.iterations = iterations;
        }
        if let Some(runs) = parse_env(lookup, ENV_RUNS)? {
            self.runs = runs;
        }
        if let Some(pause_ms) = parse_env::<u64, _>(lookup, ENV_PAUSE_MS)? {
            self.pause = Duration::from_millis(pause_ms);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.host.trim().is_empty() {
            return Err(ConfigError::invalid("database.host", "must not be empty"));
        }
        if self.database.dbname.trim().is_empty() {
            return Err(ConfigError::invalid("database.dbname", "must not be empty"));
        }
        if self.database.user.trim().is_empty() {
            return Err(ConfigError::invalid("database.user", "must not be empty"));
        }
        if self.database.connect_timeout.is_zero() {
            return Err(ConfigError::invalid("database.connect_timeout_secs", "must be > 0"));
        }
        if self.iterations == 0 {
            return Err(ConfigError::invalid("bench.iterations", "must be > 0"));
        }
        if self.iterations > i32::MAX as usize {
            return Err(ConfigError::invalid(
                "bench.iterations",
                format!("must fit the INT position column (<= {})", i32::MAX),
            ));
        }
        if self.runs == 0 {
            return Err(ConfigError::invalid("bench.runs", "must be > 0"));
        }
        let strategies: Vec<KeyStrategy> = self.tables.iter().map(TableSpec::strategy).collect();
        if strategies != KeyStrategy::ALL {
            return Err(ConfigError::invalid(
                "tables",
                "must hold exactly one table per strategy in order",
            ));
        }
        for (i, spec) in self.tables.iter().enumerate() {
            if self.tables[..i].iter().any(|other| other.name() == spec.name()) {
                return Err(ConfigError::invalid(
                    "tables",
                    format!("table {} is used by more than one strategy", spec.name()),
                ));
            }
        }
        Ok(())
    }
}

fn parse_env<T, F>(lookup: &F, key: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::invalid(key, format!("{:?}: {}", raw, e))),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = BenchConfig::default();
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.database.dbname, "postgres");
        assert_eq!(config.database.user, "postgres");
        assert_eq!(config.database.password, "topsecret");
        assert_eq!(config.iterations, 10_000);
        assert_eq!(config.runs, 3);
        assert_eq!(config.pause, Duration::from_secs(1));
        assert_eq!(config.tables[0].name(), "test_auto_inc");
        assert_eq!(config.tables[1].name(), "test_uuid");
        assert_eq!(config.tables[2].name(), "test_uuid_str");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let config = BenchConfig::from_lookup(lookup_from(&[
            ("KEYBENCH_DB_HOST", "db.internal"),
            ("KEYBENCH_DB_PORT", "6543"),
            ("KEYBENCH_ITERATIONS", "10"),
            ("KEYBENCH_RUNS", "1"),
            ("KEYBENCH_PAUSE_MS", "0"),
        ]))
        .expect("config should load");

        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 6543);
        assert_eq!(config.iterations, 10);
        assert_eq!(config.runs, 1);
        assert_eq!(config.pause, Duration::ZERO);
    }

    #[test]
    fn test_env_parse_failure_is_reported() {
        let err = BenchConfig::from_lookup(lookup_from(&[("KEYBENCH_ITERATIONS", "lots")]))
            .expect_err("non-numeric iterations must fail");
        match err {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, "KEYBENCH_ITERATIONS"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let result = BenchConfig::from_lookup(lookup_from(&[("KEYBENCH_ITERATIONS", "0")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_zero_runs_rejected() {
        let result = BenchConfig::from_lookup(lookup_from(&[("KEYBENCH_RUNS", "0")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_toml_partial_overrides_defaults() {
        let config = BenchConfig::from_toml_str(
            r#"
            [database]
            host = "pg"
            password = "hunter2"

            [bench]
            iterations = 500

            [tables]
            uuid = "bench_uuid"
            "#,
        )
        .expect("toml should parse");

        assert_eq!(config.database.host, "pg");
        assert_eq!(config.database.password, "hunter2");
        assert_eq!(config.database.port, 5432);
        assert_eq!(config.iterations, 500);
        assert_eq!(config.runs, 3);
        assert_eq!(config.tables[0].name(), "test_auto_inc");
        assert_eq!(config.tables[1].name(), "bench_uuid");
        assert_eq!(config.tables[1].strategy(), KeyStrategy::BinaryUuid);
    }

    #[test]
    fn test_toml_unknown_field_rejected() {
        let result = BenchConfig::from_toml_str("[bench]\nthreads = 4\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_toml_bad_table_name_rejected() {
        let result = BenchConfig::from_toml_str("[tables]\nuuid_str = \"x; drop\"\n");
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_duplicate_table_names_rejected() {
        let config = BenchConfig::from_toml_str(
            "[tables]\nauto_increment = \"same\"\nuuid = \"same\"\n",
        )
        .expect("toml should parse");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_then_env() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[bench]\niterations = 42\nruns = 2").expect("write config");
        let path = file.path().to_string_lossy().to_string();

        let config = BenchConfig::from_lookup(lookup_from(&[
            ("KEYBENCH_CONFIG", path.as_str()),
            ("KEYBENCH_RUNS", "5"),
        ]))
        .expect("config should load");

        assert_eq!(config.iterations, 42);
        assert_eq!(config.runs, 5);
    }

    #[test]
    fn test_missing_config_file_is_io_error() {
        let result = BenchConfig::from_lookup(lookup_from(&[(
            "KEYBENCH_CONFIG",
            "/nonexistent/keybench.toml",
        )]));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
