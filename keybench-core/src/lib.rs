//! keybench Core - Strategies, SQL and Timing Math
//!
//! Pure data and arithmetic for the primary-key benchmark. Nothing in this
//! crate touches the network; the runner crate drives the database.

pub mod config;
pub mod constants;
pub mod error;
pub mod strategy;
pub mod timing;

pub use config::{BenchConfig, DatabaseConfig};
pub use error::ConfigError;
pub use strategy::{validate_identifier, KeyStrategy, PrimaryKey, TableSpec};
pub use timing::{split_halves, BenchReport, InsertTiming, LookupTiming, StrategyTotals};
