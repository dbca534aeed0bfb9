//! Primary-key strategies and the SQL each benchmark table needs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::ConfigError;

// ============================================================================
// KEY STRATEGY
// ============================================================================

/// How a benchmark table generates its primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyStrategy {
    /// Integer key drawn from a database sequence (`SERIAL`).
    AutoIncrement,
    /// 128-bit `UUID` column filled by `gen_random_uuid()`.
    BinaryUuid,
    /// `TEXT` column filled by `gen_random_uuid()` rendered as text.
    TextUuid,
}

impl KeyStrategy {
    /// Every strategy, in the order tables are benchmarked and reported.
    pub const ALL: [KeyStrategy; 3] = [
        KeyStrategy::AutoIncrement,
        KeyStrategy::BinaryUuid,
        KeyStrategy::TextUuid,
    ];

    pub fn default_table_name(&self) -> &'static str {
        match self {
            KeyStrategy::AutoIncrement => "test_auto_inc",
            KeyStrategy::BinaryUuid => "test_uuid",
            KeyStrategy::TextUuid => "test_uuid_str",
        }
    }

    /// Column definition for `id`, including any server-side default.
    pub fn key_column_type(&self) -> &'static str {
        match self {
            KeyStrategy::AutoIncrement => "SERIAL",
            KeyStrategy::BinaryUuid => "UUID DEFAULT gen_random_uuid ()",
            KeyStrategy::TextUuid => "TEXT DEFAULT gen_random_uuid ()",
        }
    }
}

impl fmt::Display for KeyStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            KeyStrategy::AutoIncrement => "auto_increment",
            KeyStrategy::BinaryUuid => "uuid",
            KeyStrategy::TextUuid => "uuid_str",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for KeyStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "auto_increment" | "auto_inc" | "serial" => Ok(KeyStrategy::AutoIncrement),
            "uuid" | "binary_uuid" => Ok(KeyStrategy::BinaryUuid),
            "uuid_str" | "text_uuid" => Ok(KeyStrategy::TextUuid),
            _ => Err(format!("Invalid key strategy: {}", s)),
        }
    }
}

// ============================================================================
// TABLE SPEC
// ============================================================================

/// A key strategy bound to the table that exercises it.
///
/// The table name is interpolated into SQL text, so it is only constructed
/// through [`TableSpec::new`], which rejects anything that is not a plain
/// lowercase identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSpec {
    strategy: KeyStrategy,
    name: String,
}

impl TableSpec {
    pub fn new(strategy: KeyStrategy, name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        validate_identifier(&name)?;
        Ok(Self { strategy, name })
    }

    /// Table spec using the strategy's default table name.
    pub fn with_default_name(strategy: KeyStrategy) -> Self {
        Self {
            strategy,
            name: strategy.default_table_name().to_string(),
        }
    }

    pub fn strategy(&self) -> KeyStrategy {
        self.strategy
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn create_sql(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS {} (\n    id {},\n    position INT NOT NULL,\n    PRIMARY KEY (id)\n)",
            self.name,
            self.strategy.key_column_type()
        )
    }

    pub fn clear_sql(&self) -> String {
        format!("DELETE FROM {}", self.name)
    }

    pub fn count_sql(&self) -> String {
        format!("SELECT COUNT(*) FROM {}", self.name)
    }

    pub fn insert_sql(&self) -> String {
        format!("INSERT INTO {} (position) VALUES ($1)", self.name)
    }

    pub fn select_keys_sql(&self) -> String {
        format!("SELECT id FROM {}", self.name)
    }

    /// Point lookup by primary key.
    ///
    /// Non-integer keys are bound as text; the binary UUID column casts the
    /// parameter back server-side.
    pub fn lookup_sql(&self) -> String {
        let param = match self.strategy {
            KeyStrategy::AutoIncrement | KeyStrategy::TextUuid => "$1",
            KeyStrategy::BinaryUuid => "$1::text::uuid",
        };
        format!("SELECT id, position FROM {} WHERE id = {}", self.name, param)
    }
}

impl fmt::Display for TableSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Accept `[a-z_][a-z0-9_]*` up to PostgreSQL's 63 byte identifier limit.
pub fn validate_identifier(name: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidValue {
        field: "table name".to_string(),
        reason: format!("{:?} {}", name, reason),
    };

    if name.is_empty() {
        return Err(invalid("must not be empty"));
    }
    if name.len() > 63 {
        return Err(invalid("exceeds 63 bytes"));
    }
    let mut chars = name.chars();
    if let Some(first) = chars.next() {
        if !(first.is_ascii_lowercase() || first == '_') {
            return Err(invalid("must start with a lowercase letter or underscore"));
        }
    }
    if !chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_') {
        return Err(invalid("may only contain lowercase letters, digits and underscores"));
    }
    Ok(())
}

// ============================================================================
// PRIMARY KEY VALUES
// ============================================================================

/// A primary key value read back from a benchmark table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PrimaryKey {
    Serial(i32),
    Uuid(Uuid),
    Text(String),
}

impl PrimaryKey {
    /// Integer keys stay as they are; everything else becomes text.
    pub fn normalize(self) -> PrimaryKey {
        match self {
            PrimaryKey::Serial(id) => PrimaryKey::Serial(id),
            PrimaryKey::Uuid(id) => PrimaryKey::Text(id.to_string()),
            PrimaryKey::Text(id) => PrimaryKey::Text(id),
        }
    }
}

impl fmt::Display for PrimaryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimaryKey::Serial(id) => write!(f, "{}", id),
            PrimaryKey::Uuid(id) => write!(f, "{}", id),
            PrimaryKey::Text(id) => write!(f, "{}", id),
        }
    }
}
