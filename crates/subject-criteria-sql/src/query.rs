//! Compiled statements

use crate::value::SqlValue;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use subject_criteria_catalog::CanonicalField;

/// Which predicates a statement carries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileMode {
    /// Every non-sentinel predicate, AND-joined
    Combined,
    /// Only the named field's predicate
    Isolated(CanonicalField),
    /// Every non-sentinel predicate, ordered by subject id and limited
    Selection { limit: u32 },
}

impl fmt::Display for CompileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Combined => write!(f, "combined"),
            Self::Isolated(field) => write!(f, "isolated({})", field),
            Self::Selection { limit } => write!(f, "selection(limit {})", limit),
        }
    }
}

/// A parameterized statement ready for a query executor
///
/// The statement selects `(screening_subject_id, subject_nhs_number)` for every
/// subject row satisfying its predicates. Bind names are stored without the
/// leading colon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompiledQuery {
    pub sql: String,
    pub binds: IndexMap<String, SqlValue>,
    /// Fields whose predicates the statement carries
    pub fields: Vec<CanonicalField>,
}

impl CompiledQuery {
    /// Get a bind value by name (without the colon)
    pub fn bind(&self, name: &str) -> Option<&SqlValue> {
        self.binds.get(name)
    }
}

impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.sql)?;
        for (name, value) in &self.binds {
            writeln!(f, "  :{} = {}", name, value)?;
        }
        Ok(())
    }
}
