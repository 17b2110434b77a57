//! Finding existing subjects that match criteria

use crate::config::EngineConfig;
use crate::executor::QueryExecutor;
use subject_criteria_ast::Criteria;
use subject_criteria_catalog::{CriteriaNormalizer, FieldCatalog};
use subject_criteria_diagnostics::Result;
use subject_criteria_sql::{CompileMode, QueryCompiler};
use tracing::debug;

/// Selects NHS numbers of subjects matching criteria, lowest subject id first
pub struct SubjectSelector<E> {
    executor: E,
    catalog: &'static FieldCatalog,
    config: EngineConfig,
}

impl<E: QueryExecutor> SubjectSelector<E> {
    pub fn new(executor: E) -> Result<Self> {
        Self::with_config(executor, EngineConfig::default())
    }

    pub fn with_config(executor: E, config: EngineConfig) -> Result<Self> {
        Ok(Self {
            executor,
            catalog: FieldCatalog::global()?,
            config,
        })
    }

    /// Up to `limit` matching NHS numbers
    pub fn find_subjects(&self, criteria: &Criteria, limit: u32) -> Result<Vec<String>> {
        let compiler = QueryCompiler::new(self.catalog)
            .with_dialect(self.config.dialect)
            .with_today(self.config.today);
        let normalized = CriteriaNormalizer::new(self.catalog).normalize(criteria)?;
        let plan = compiler.plan(None, &normalized)?;
        let query = compiler.compile(&plan, CompileMode::Selection { limit })?;

        let rows = self.executor.execute(&query)?;
        debug!(matches = rows.len(), limit, "subject selection");
        Ok(rows.nhs_numbers().map(str::to_string).collect())
    }

    /// The first matching NHS number, if any
    pub fn find_subject(&self, criteria: &Criteria) -> Result<Option<String>> {
        Ok(self.find_subjects(criteria, 1)?.into_iter().next())
    }
}
