//! Subject criteria diagnostics and error handling
//!
//! This crate provides the error handling infrastructure shared by every layer
//! of the criteria pipeline: error codes, the criteria error taxonomy, the
//! query-execution error boundary and diagnostic reporting.

mod error;
mod error_code;
mod execution;

pub use error::*;
pub use error_code::*;
pub use execution::*;

/// Result type for criteria operations
pub type Result<T> = std::result::Result<T, CriteriaError>;
