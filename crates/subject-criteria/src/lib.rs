//! Screening subject criteria assertions
//!
//! Verifies that a subject's persisted state matches a map of human-readable
//! criteria such as `{"screening status": "Call", "subject age": "> 28"}`.
//! The criteria are normalized against a field catalog, parsed into typed
//! expressions, compiled to parameterized SQL and run through an injected
//! query executor. A failed verification names exactly the criteria the
//! subject violates.
//!
//! # Example
//!
//! ```no_run
//! use subject_criteria::{AssertionEngine, Criteria, SqliteConfig, SqliteExecutor};
//!
//! # fn main() -> subject_criteria::Result<()> {
//! let executor = SqliteExecutor::open("screening.db", &SqliteConfig::default())?;
//! let engine = AssertionEngine::new(executor)?;
//!
//! let criteria = Criteria::new()
//!     .with("screening status", "Call")
//!     .with("subject age", "> 28");
//! let result = engine.verify("9990000001", &criteria)?;
//! println!("{}", result);
//! # Ok(())
//! # }
//! ```

pub use subject_criteria_ast as ast;
pub use subject_criteria_catalog as catalog;
pub use subject_criteria_diagnostics as diagnostics;
pub use subject_criteria_engine as engine;
pub use subject_criteria_parser as parser;
pub use subject_criteria_sql as sql;

// Convenience re-exports
pub use subject_criteria_ast::{Criteria, Expression, RawValue};
pub use subject_criteria_catalog::{CanonicalField, FieldCatalog};
pub use subject_criteria_diagnostics::{CriteriaError, Result};
pub use subject_criteria_engine::{
    AssertionEngine, AssertionResult, EngineConfig, FailedCriterion, QueryExecutor, SqliteConfig,
    SqliteExecutor, SubjectSelector, subject_assertion,
};
pub use subject_criteria_sql::{CompileMode, CompiledQuery, Dialect, QueryCompiler};

#[cfg(feature = "cli")]
pub mod cli;
