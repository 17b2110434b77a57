//! Parsed and validated criteria, ready for statement assembly

use crate::value::SqlValue;
use subject_criteria_ast::{Criterion, Expression};
use subject_criteria_catalog::{CanonicalField, Join};

/// A predicate fragment for one field
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Predicate {
    pub(crate) sql: String,
    pub(crate) binds: Vec<(String, SqlValue)>,
    pub(crate) joins: Vec<Join>,
    pub(crate) uses_today: bool,
}

/// One criterion after parsing and predicate generation
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedCriterion {
    pub field: CanonicalField,
    pub criterion: Criterion,
    pub expression: Expression,
    pub(crate) predicate: Option<Predicate>,
}

impl PlannedCriterion {
    /// Whether the criterion produces a predicate (sentinels do not)
    pub fn is_checked(&self) -> bool {
        self.predicate.is_some()
    }

    /// The SQL fragment this criterion contributes, if any
    pub fn predicate_sql(&self) -> Option<&str> {
        self.predicate.as_ref().map(|p| p.sql.as_str())
    }
}

/// Every criterion of one call, parsed and validated
///
/// Building a plan surfaces every field, expression and literal error before
/// any statement is issued.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CriteriaPlan {
    pub(crate) nhs_number: Option<String>,
    pub(crate) criteria: Vec<PlannedCriterion>,
}

impl CriteriaPlan {
    /// The subject the plan is anchored on, if any
    pub fn nhs_number(&self) -> Option<&str> {
        self.nhs_number.as_deref()
    }

    /// All planned criteria in caller order
    pub fn criteria(&self) -> &[PlannedCriterion] {
        &self.criteria
    }

    /// Criteria that produce a predicate
    pub fn checked(&self) -> impl Iterator<Item = &PlannedCriterion> {
        self.criteria.iter().filter(|c| c.is_checked())
    }

    /// Criteria excluded from verification
    pub fn skipped(&self) -> impl Iterator<Item = &PlannedCriterion> {
        self.criteria.iter().filter(|c| !c.is_checked())
    }

    pub fn get(&self, field: CanonicalField) -> Option<&PlannedCriterion> {
        self.criteria.iter().find(|c| c.field == field)
    }
}
