//! Criteria normalization onto the canonical vocabulary

use crate::catalog::FieldCatalog;
use crate::field::CanonicalField;
use indexmap::IndexMap;
use indexmap::map::Entry;
use subject_criteria_ast::{Criteria, Criterion};
use subject_criteria_diagnostics::{CriteriaError, Result};

/// Criteria keyed by canonical field, in caller order
pub type NormalizedCriteria = IndexMap<CanonicalField, Criterion>;

/// Resolves caller-supplied field names through a [`FieldCatalog`]
#[derive(Debug, Clone, Copy)]
pub struct CriteriaNormalizer<'a> {
    catalog: &'a FieldCatalog,
}

impl<'a> CriteriaNormalizer<'a> {
    pub fn new(catalog: &'a FieldCatalog) -> Self {
        Self { catalog }
    }

    /// Canonicalize every key; the first unknown or duplicate key fails the call
    pub fn normalize(&self, criteria: &Criteria) -> Result<NormalizedCriteria> {
        let mut normalized = IndexMap::with_capacity(criteria.len());
        for criterion in criteria.criteria() {
            let field = self.resolve(&criterion.raw_field)?;
            match normalized.entry(field) {
                Entry::Occupied(existing) => {
                    let first: &Criterion = existing.get();
                    return Err(CriteriaError::duplicate_field(
                        field.as_str(),
                        first.raw_field.clone(),
                        criterion.raw_field,
                    ));
                }
                Entry::Vacant(slot) => {
                    slot.insert(criterion);
                }
            }
        }
        Ok(normalized)
    }

    /// Resolve one raw field name
    pub fn resolve(&self, raw_field: &str) -> Result<CanonicalField> {
        self.catalog.resolve(raw_field).ok_or_else(|| {
            CriteriaError::unknown_field(raw_field, self.catalog.suggest(raw_field))
        })
    }
}
