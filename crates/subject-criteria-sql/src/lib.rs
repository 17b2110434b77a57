//! Criteria to SQL compilation
//!
//! [`QueryCompiler::plan`] parses and validates a whole set of normalized
//! criteria; [`QueryCompiler::compile`] then renders a plan as one of:
//!
//! - a combined statement carrying every non-sentinel predicate
//! - an isolated statement carrying a single field's predicate
//! - a selection statement without the NHS-number anchor, used to find subjects
//!
//! Statements select subject rows from `screening_subject_t ss`, join only the
//! relations their predicates need (one join per alias) and carry every value
//! as a `:name` bind variable.

mod compiler;
mod dialect;
mod literal;
mod plan;
mod query;
mod value;

pub use compiler::QueryCompiler;
pub use dialect::Dialect;
pub use plan::{CriteriaPlan, PlannedCriterion};
pub use query::{CompileMode, CompiledQuery};
pub use value::SqlValue;
