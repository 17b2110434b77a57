//! Engine and executor configuration

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use subject_criteria_diagnostics::{CriteriaError, Result};
use subject_criteria_sql::Dialect;

/// Assertion engine settings
///
/// ```toml
/// dialect = "sqlite"
/// today = "2025-06-01"
///
/// [sqlite]
/// busy_timeout_ms = 5000
/// query_timeout_ms = 30000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// SQL dialect statements are rendered in
    pub dialect: Dialect,
    /// Calendar date used instead of the store clock
    pub today: Option<NaiveDate>,
    pub sqlite: SqliteConfig,
}

impl EngineConfig {
    /// Parse a TOML document
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| CriteriaError::config(e.to_string()))
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| CriteriaError::config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }
}

/// SQLite executor settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SqliteConfig {
    /// How long to wait on a locked database before giving up
    pub busy_timeout_ms: u64,
    /// Per-statement deadline enforced through the progress handler
    pub query_timeout_ms: Option<u64>,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            busy_timeout_ms: 5000,
            query_timeout_ms: None,
        }
    }
}

impl SqliteConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    pub fn query_timeout(&self) -> Option<Duration> {
        self.query_timeout_ms.map(Duration::from_millis)
    }
}
