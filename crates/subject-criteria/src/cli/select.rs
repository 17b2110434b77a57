//! Select command implementation

use super::input::{CriteriaInput, open_database};
use super::output::{self, OutputFormat};
use anyhow::Result;
use std::path::PathBuf;
use subject_criteria_engine::{EngineConfig, SubjectSelector};

/// Configuration for select command
pub struct SelectConfig {
    pub database: PathBuf,
    pub criteria: CriteriaInput,
    pub limit: u32,
    pub engine: EngineConfig,
    pub format: OutputFormat,
}

/// Print NHS numbers of subjects matching the criteria
pub fn select(config: SelectConfig) -> Result<()> {
    let criteria = config.criteria.load()?;
    let executor = open_database(&config.database, &config.engine)?;
    let selector = SubjectSelector::with_config(executor, config.engine)?;
    let found = selector.find_subjects(&criteria, config.limit)?;

    output::print(&found, config.format, || {
        if found.is_empty() {
            output::format_failure("no matching subjects")
        } else {
            found.join("\n")
        }
    })
}
