//! Compile command implementation
//!
//! Renders the SQL for a set of criteria without touching a database.

use super::input::CriteriaInput;
use super::output::{self, OutputFormat};
use anyhow::{Context, Result};
use colored::Colorize;
use subject_criteria_catalog::{CriteriaNormalizer, FieldCatalog};
use subject_criteria_diagnostics::CriteriaError;
use subject_criteria_engine::EngineConfig;
use subject_criteria_sql::{CompileMode, CompiledQuery, QueryCompiler};

/// Configuration for compile command
pub struct CompileConfig {
    /// Subject to anchor on; selection SQL when absent
    pub nhs_number: Option<String>,
    pub criteria: CriteriaInput,
    /// Raw field name to isolate
    pub isolate: Option<String>,
    pub limit: u32,
    pub engine: EngineConfig,
    pub format: OutputFormat,
}

/// Compile criteria to a statement
pub fn compile_query(config: &CompileConfig) -> Result<CompiledQuery> {
    let catalog = FieldCatalog::global()?;
    let criteria = config.criteria.load()?;
    let normalized = CriteriaNormalizer::new(catalog).normalize(&criteria)?;
    let compiler = QueryCompiler::new(catalog)
        .with_dialect(config.engine.dialect)
        .with_today(config.engine.today);
    let plan = compiler.plan(config.nhs_number.as_deref(), &normalized)?;

    let mode = match (&config.isolate, &config.nhs_number) {
        (Some(raw), _) => {
            let field = catalog
                .resolve(raw)
                .ok_or_else(|| CriteriaError::unknown_field(raw.as_str(), catalog.suggest(raw)))?;
            CompileMode::Isolated(field)
        }
        (None, Some(_)) => CompileMode::Combined,
        (None, None) => CompileMode::Selection { limit: config.limit },
    };
    compiler
        .compile(&plan, mode)
        .with_context(|| format!("Failed to compile {} query", mode))
}

pub fn compile(config: CompileConfig) -> Result<()> {
    let query = compile_query(&config)?;
    output::print(&query, config.format, || {
        let mut text = query.sql.clone();
        if !query.binds.is_empty() {
            text.push_str(&format!("\n\n{}", "-- binds".dimmed()));
            for (name, value) in &query.binds {
                text.push_str(&format!("\n:{} = {}", name.cyan(), value));
            }
        }
        text
    })
}
