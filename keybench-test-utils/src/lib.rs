//! keybench Test Utilities
//!
//! Shared test infrastructure for the keybench workspace:
//! - Proptest generators for strategies, keys and timings
//! - Fixtures for configurations and database clients

pub use keybench_core::{
    BenchConfig, InsertTiming, KeyStrategy, LookupTiming, PrimaryKey, TableSpec,
};

use keybench_runner::DbClient;
use proptest::prelude::*;
use std::time::Duration;
use uuid::Uuid;

// ============================================================================
// GENERATORS
// ============================================================================

/// Generate any key strategy.
pub fn arb_key_strategy() -> impl Strategy<Value = KeyStrategy> {
    prop_oneof![
        Just(KeyStrategy::AutoIncrement),
        Just(KeyStrategy::BinaryUuid),
        Just(KeyStrategy::TextUuid),
    ]
}

/// Generate a primary key of the shape `strategy` produces.
pub fn arb_primary_key(strategy: KeyStrategy) -> BoxedStrategy<PrimaryKey> {
    match strategy {
        KeyStrategy::AutoIncrement => (1i32..=i32::MAX).prop_map(PrimaryKey::Serial).boxed(),
        KeyStrategy::BinaryUuid => any::<[u8; 16]>()
            .prop_map(|b| PrimaryKey::Uuid(Uuid::from_bytes(b)))
            .boxed(),
        KeyStrategy::TextUuid => any::<[u8; 16]>()
            .prop_map(|b| PrimaryKey::Text(Uuid::from_bytes(b).to_string()))
            .boxed(),
    }
}

/// Generate a duration up to one minute, at millisecond resolution.
pub fn arb_duration() -> impl Strategy<Value = Duration> {
    (0u64..60_000).prop_map(Duration::from_millis)
}

pub fn arb_insert_timing() -> impl Strategy<Value = InsertTiming> {
    (arb_duration(), arb_duration()).prop_map(|(first_half, second_half)| InsertTiming {
        first_half,
        second_half,
    })
}

pub fn arb_lookup_timing() -> impl Strategy<Value = LookupTiming> {
    (1usize..100_000, arb_duration()).prop_map(|(lookups, elapsed)| LookupTiming {
        lookups,
        elapsed,
    })
}

// ============================================================================
// FIXTURES
// ============================================================================

/// Table specs named `{prefix}_{default name}` so concurrent tests never
/// share a table.
pub fn prefixed_tables(prefix: &str) -> Vec<TableSpec> {
    KeyStrategy::ALL
        .iter()
        .copied()
        .map(|strategy| {
            let name = format!("{}_{}", prefix, strategy.default_table_name());
            TableSpec::new(strategy, name).expect("prefixed table name must be a valid identifier")
        })
        .collect()
}

/// Configuration loaded from the environment with a small, fast workload on
/// tables private to `prefix`.
pub fn test_config(prefix: &str, iterations: usize, runs: u32) -> BenchConfig {
    let mut config = BenchConfig::load().expect("test configuration must load");
    config.iterations = iterations;
    config.runs = runs;
    config.pause = Duration::from_millis(10);
    config.tables = prefixed_tables(prefix);
    config
}

pub fn test_db_client(config: &BenchConfig) -> DbClient {
    DbClient::from_config(&config.database).expect("Failed to create database client")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_prefixed_tables_keep_strategy_order() {
        let tables = prefixed_tables("kb_t");
        let names: Vec<_> = tables.iter().map(|t| t.name().to_string()).collect();
        assert_eq!(names, vec!["kb_t_test_auto_inc", "kb_t_test_uuid", "kb_t_test_uuid_str"]);
        let strategies: Vec<_> = tables.iter().map(|t| t.strategy()).collect();
        assert_eq!(strategies, KeyStrategy::ALL.to_vec());
    }

    proptest! {
        /// Generated keys already in normalised form are left alone; binary
        /// UUIDs become text.
        #[test]
        fn prop_generated_keys_normalize_by_strategy(
            (strategy, key) in arb_key_strategy().prop_flat_map(|s| (Just(s), arb_primary_key(s)))
        ) {
            let normalized = key.clone().normalize();
            match strategy {
                KeyStrategy::BinaryUuid => prop_assert!(matches!(normalized, PrimaryKey::Text(_))),
                _ => prop_assert_eq!(normalized, key),
            }
        }
    }
}
