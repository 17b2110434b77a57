//! Assertion outcomes

use serde::Serialize;
use std::fmt;
use subject_criteria_ast::RawValue;
use subject_criteria_catalog::CanonicalField;

/// A criterion the subject does not satisfy
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedCriterion {
    pub field: CanonicalField,
    pub expected: RawValue,
}

impl FailedCriterion {
    pub fn new(field: CanonicalField, expected: impl Into<RawValue>) -> Self {
        Self {
            field,
            expected: expected.into(),
        }
    }
}

impl fmt::Display for FailedCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = '{}'", self.field, self.expected)
    }
}

/// Result of verifying one subject against a set of criteria
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssertionResult {
    pub passed: bool,
    /// Failed criteria in caller order; empty on pass
    pub failed_criteria: Vec<FailedCriterion>,
    /// Criteria that were accepted without being checked (`Unchanged`, `# ...`)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unverified: Vec<CanonicalField>,
}

impl AssertionResult {
    pub fn pass() -> Self {
        Self {
            passed: true,
            ..Self::default()
        }
    }

    pub fn fail(failed_criteria: Vec<FailedCriterion>) -> Self {
        Self {
            passed: false,
            failed_criteria,
            unverified: Vec::new(),
        }
    }

    pub fn with_unverified(mut self, unverified: Vec<CanonicalField>) -> Self {
        self.unverified = unverified;
        self
    }

    /// Canonical fields of the failed criteria
    pub fn failed_fields(&self) -> Vec<CanonicalField> {
        self.failed_criteria.iter().map(|f| f.field).collect()
    }
}

impl fmt::Display for AssertionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed {
            return write!(f, "passed");
        }
        write!(f, "failed")?;
        if !self.failed_criteria.is_empty() {
            let failures: Vec<String> = self.failed_criteria.iter().map(|c| c.to_string()).collect();
            write!(f, ": {}", failures.join(", "))?;
        }
        Ok(())
    }
}
