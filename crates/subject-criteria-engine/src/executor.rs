//! Query executor seam
//!
//! The engine never owns a connection. It hands compiled statements to an
//! injected [`QueryExecutor`] and only looks at which subjects came back.

use serde::Serialize;
use std::sync::Arc;
use subject_criteria_diagnostics::ExecutionError;
use subject_criteria_sql::CompiledQuery;

/// One subject row returned by a compiled statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubjectRow {
    pub screening_subject_id: i64,
    pub nhs_number: String,
}

/// Rows returned by one statement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowSet {
    pub rows: Vec<SubjectRow>,
}

impl RowSet {
    pub fn new(rows: Vec<SubjectRow>) -> Self {
        Self { rows }
    }

    pub fn contains_nhs_number(&self, nhs_number: &str) -> bool {
        self.rows.iter().any(|row| row.nhs_number == nhs_number)
    }

    pub fn nhs_numbers(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|row| row.nhs_number.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<SubjectRow> for RowSet {
    fn from_iter<I: IntoIterator<Item = SubjectRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Runs compiled statements against the store
///
/// Implementations must be read-only and synchronous. A timeout must surface
/// as [`ExecutionError`] with kind `Timeout`.
pub trait QueryExecutor {
    fn execute(&self, query: &CompiledQuery) -> Result<RowSet, ExecutionError>;
}

impl<T: QueryExecutor + ?Sized> QueryExecutor for &T {
    fn execute(&self, query: &CompiledQuery) -> Result<RowSet, ExecutionError> {
        (**self).execute(query)
    }
}

impl<T: QueryExecutor + ?Sized> QueryExecutor for Box<T> {
    fn execute(&self, query: &CompiledQuery) -> Result<RowSet, ExecutionError> {
        (**self).execute(query)
    }
}

impl<T: QueryExecutor + ?Sized> QueryExecutor for Arc<T> {
    fn execute(&self, query: &CompiledQuery) -> Result<RowSet, ExecutionError> {
        (**self).execute(query)
    }
}
