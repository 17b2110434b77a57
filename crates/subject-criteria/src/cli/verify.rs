//! Verify command implementation

use super::input::{CriteriaInput, open_database};
use super::output::{self, OutputFormat};
use anyhow::{Result, bail};
use serde::Serialize;
use std::path::PathBuf;
use subject_criteria_engine::{AssertionEngine, AssertionResult, EngineConfig};

/// Configuration for verify command
pub struct VerifyConfig {
    pub database: PathBuf,
    pub nhs_number: String,
    pub criteria: CriteriaInput,
    pub engine: EngineConfig,
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct VerifyReport<'a> {
    nhs_number: &'a str,
    #[serde(flatten)]
    result: &'a AssertionResult,
}

/// Verify one subject; `Ok(false)` when the subject does not match
pub fn verify(config: VerifyConfig) -> Result<bool> {
    let criteria = config.criteria.load()?;
    if criteria.is_empty() {
        bail!("No criteria given; use --criteria FILE or --set FIELD=VALUE");
    }

    let executor = open_database(&config.database, &config.engine)?;
    let engine = AssertionEngine::with_config(executor, config.engine)?;
    let result = engine.verify(&config.nhs_number, &criteria)?;

    let report = VerifyReport {
        nhs_number: &config.nhs_number,
        result: &result,
    };
    output::print(&report, config.format, || {
        output::format_assertion(&config.nhs_number, &result)
    })?;
    Ok(result.passed)
}
