//! Criteria and configuration loading

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};
use subject_criteria_ast::Criteria;
use subject_criteria_engine::{EngineConfig, SqliteExecutor};
use subject_criteria_sql::Dialect;

/// Where the criteria for a command come from
#[derive(Debug, Clone, Default)]
pub struct CriteriaInput {
    /// JSON object file of `field -> expected`
    pub file: Option<PathBuf>,
    /// `field=value` pairs applied after the file, in order
    pub assignments: Vec<String>,
}

impl CriteriaInput {
    /// Load the file, then apply assignments on top
    pub fn load(&self) -> Result<Criteria> {
        let mut criteria = match &self.file {
            Some(path) => read_criteria_file(path)?,
            None => Criteria::new(),
        };
        for assignment in &self.assignments {
            let (field, value) = parse_assignment(assignment)?;
            criteria.insert(field, value);
        }
        Ok(criteria)
    }
}

/// Read a JSON object of criteria, keeping the file's key order
pub fn read_criteria_file(path: &Path) -> Result<Criteria> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read criteria file: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Criteria file is not a JSON object of field/value pairs: {}", path.display()))
}

/// Split `field=value` at the first `=`
///
/// The value is kept verbatim; the field is trimmed.
pub fn parse_assignment(assignment: &str) -> Result<(String, String)> {
    let Some((field, value)) = assignment.split_once('=') else {
        bail!("Expected FIELD=VALUE, got '{}'", assignment);
    };
    let field = field.trim();
    if field.is_empty() {
        bail!("Missing field name in '{}'", assignment);
    }
    Ok((field.to_string(), value.to_string()))
}

/// Engine settings: the optional TOML file, then command-line overrides
pub fn engine_config(
    path: Option<&Path>,
    dialect: Option<Dialect>,
    today: Option<NaiveDate>,
) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(dialect) = dialect {
        config = config.with_dialect(dialect);
    }
    if let Some(today) = today {
        config = config.with_today(today);
    }
    tracing::debug!(dialect = %config.dialect, today = ?config.today, "engine configuration");
    Ok(config)
}

/// Open the SQLite store named on the command line
pub fn open_database(path: &Path, config: &EngineConfig) -> Result<SqliteExecutor> {
    if config.dialect != Dialect::Sqlite {
        bail!("Database commands need the sqlite dialect, got {}", config.dialect);
    }
    if !path.exists() {
        bail!("Database not found: {}", path.display());
    }
    SqliteExecutor::open(path, &config.sqlite)
        .with_context(|| format!("Failed to open database: {}", path.display()))
}
