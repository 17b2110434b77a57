//! Subject assertion engine
//!
//! `verify` walks a fixed sequence of phases:
//!
//! ```text
//! Start -> SubjectLookup -> CombinedCheck -> Pass
//!                                         -> DiagnosePerCriterion -> Fail
//! ```
//!
//! Every field, expression and literal error is raised during `Start`, before
//! the first statement reaches the executor. Executor errors abort the call
//! and are never retried.

use crate::config::EngineConfig;
use crate::executor::{QueryExecutor, RowSet};
use crate::result::{AssertionResult, FailedCriterion};
use std::fmt;
use subject_criteria_ast::Criteria;
use subject_criteria_catalog::{CriteriaNormalizer, FieldCatalog};
use subject_criteria_diagnostics::{CriteriaError, Result};
use subject_criteria_sql::{CompileMode, CompiledQuery, QueryCompiler};
use tracing::{debug, info, warn};

/// Stage of a `verify` call, recorded on log events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Start,
    SubjectLookup,
    CombinedCheck,
    DiagnosePerCriterion,
    Pass,
    Fail,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Start => "start",
            Self::SubjectLookup => "subject_lookup",
            Self::CombinedCheck => "combined_check",
            Self::DiagnosePerCriterion => "diagnose_per_criterion",
            Self::Pass => "pass",
            Self::Fail => "fail",
        };
        f.write_str(name)
    }
}

/// Verifies a subject's persisted state against human-readable criteria
pub struct AssertionEngine<E> {
    executor: E,
    catalog: &'static FieldCatalog,
    config: EngineConfig,
}

impl<E: QueryExecutor> AssertionEngine<E> {
    /// Create an engine over the global field catalog
    pub fn new(executor: E) -> Result<Self> {
        Self::with_config(executor, EngineConfig::default())
    }

    pub fn with_config(executor: E, config: EngineConfig) -> Result<Self> {
        Ok(Self::with_catalog(executor, FieldCatalog::global()?, config))
    }

    pub fn with_catalog(executor: E, catalog: &'static FieldCatalog, config: EngineConfig) -> Self {
        Self {
            executor,
            catalog,
            config,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn compiler(&self) -> QueryCompiler<'static> {
        QueryCompiler::new(self.catalog)
            .with_dialect(self.config.dialect)
            .with_today(self.config.today)
    }

    /// Verify a subject against criteria
    ///
    /// Returns `Err` only for invalid criteria, an unknown subject or an
    /// executor failure. A subject that does not match is an `Ok` result with
    /// `passed == false` and the violated criteria listed.
    pub fn verify(&self, nhs_number: &str, criteria: &Criteria) -> Result<AssertionResult> {
        let compiler = self.compiler();
        debug!(phase = %Phase::Start, nhs_number, criteria = criteria.len(), "verifying subject");

        let normalized = CriteriaNormalizer::new(self.catalog).normalize(criteria)?;
        let plan = compiler.plan(Some(nhs_number), &normalized)?;
        let unverified: Vec<_> = plan.skipped().map(|c| c.field).collect();
        for field in &unverified {
            debug!(phase = %Phase::Start, %field, "criterion not verified");
        }

        let lookup = compiler.compile_subject_lookup(nhs_number);
        if !self.run(Phase::SubjectLookup, &lookup)?.contains_nhs_number(nhs_number) {
            return Err(CriteriaError::subject_not_found(nhs_number));
        }

        if plan.checked().next().is_none() {
            info!(phase = %Phase::Pass, nhs_number, "no criteria to check");
            return Ok(AssertionResult::pass().with_unverified(unverified));
        }

        let combined = compiler.compile(&plan, CompileMode::Combined)?;
        if self.run(Phase::CombinedCheck, &combined)?.contains_nhs_number(nhs_number) {
            info!(phase = %Phase::Pass, nhs_number, "subject matches criteria");
            return Ok(AssertionResult::pass().with_unverified(unverified));
        }

        let mut failed = Vec::new();
        for criterion in plan.checked() {
            let isolated = compiler.compile(&plan, CompileMode::Isolated(criterion.field))?;
            let rows = self.run(Phase::DiagnosePerCriterion, &isolated)?;
            if !rows.contains_nhs_number(nhs_number) {
                warn!(
                    phase = %Phase::Fail,
                    nhs_number,
                    field = %criterion.field,
                    expected = %criterion.criterion.raw_expected,
                    "criterion failed"
                );
                failed.push(FailedCriterion::new(
                    criterion.field,
                    criterion.criterion.raw_expected.clone(),
                ));
            }
        }

        if failed.is_empty() {
            warn!(
                phase = %Phase::Fail,
                nhs_number,
                "combined check failed but every criterion passes in isolation"
            );
        }
        Ok(AssertionResult::fail(failed).with_unverified(unverified))
    }

    /// Boolean convenience wrapper around [`verify`](Self::verify)
    pub fn check(&self, nhs_number: &str, criteria: &Criteria) -> Result<bool> {
        Ok(self.verify(nhs_number, criteria)?.passed)
    }

    fn run(&self, phase: Phase, query: &CompiledQuery) -> Result<RowSet> {
        debug!(%phase, sql = %query.sql, "executing");
        self.executor.execute(query).map_err(|err| {
            warn!(%phase, error = %err, "query execution failed");
            CriteriaError::from(err)
        })
    }
}

/// Verify a subject in one call
pub fn subject_assertion<E: QueryExecutor>(
    executor: E,
    nhs_number: &str,
    criteria: &Criteria,
) -> Result<bool> {
    AssertionEngine::new(executor)?.check(nhs_number, criteria)
}
