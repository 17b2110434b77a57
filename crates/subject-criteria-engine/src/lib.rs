//! Subject criteria assertion engine
//!
//! This crate runs compiled criteria against a store:
//! - [`QueryExecutor`]: the injected, read-only statement runner
//! - [`SqliteExecutor`]: the bundled SQLite implementation
//! - [`AssertionEngine`]: verifies one subject and diagnoses failures
//!   criterion by criterion
//! - [`SubjectSelector`]: finds existing subjects that match criteria
//!
//! # Example
//!
//! ```no_run
//! use subject_criteria_ast::Criteria;
//! use subject_criteria_engine::{AssertionEngine, SqliteConfig, SqliteExecutor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let executor = SqliteExecutor::open("screening.db", &SqliteConfig::default())?;
//! let engine = AssertionEngine::new(executor)?;
//!
//! let criteria = Criteria::new()
//!     .with("screening status", "Call")
//!     .with("screening due date", "Today");
//! let result = engine.verify("9990000001", &criteria)?;
//! if !result.passed {
//!     for failure in &result.failed_criteria {
//!         eprintln!("{}", failure);
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod config;
mod engine;
mod executor;
mod result;
mod selector;
mod sqlite;

pub use config::{EngineConfig, SqliteConfig};
pub use engine::{AssertionEngine, Phase, subject_assertion};
pub use executor::{QueryExecutor, RowSet, SubjectRow};
pub use result::{AssertionResult, FailedCriterion};
pub use selector::SubjectSelector;
pub use sqlite::SqliteExecutor;
