//! Field catalog with load-time self-check

use crate::builtin::{BUILTIN_FIELDS, CATALOG_VERSION};
use crate::event_status::EventStatusTable;
use crate::field::CanonicalField;
use crate::schema::ColumnExpr;
use crate::spec::{FieldSpec, normalize_key};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::LazyLock;
use subject_criteria_diagnostics::{CriteriaError, Result};

/// Minimum similarity for a "did you mean" suggestion
const SUGGESTION_THRESHOLD: f64 = 0.85;

static GLOBAL: LazyLock<Result<FieldCatalog>> = LazyLock::new(FieldCatalog::load);

/// Static, versioned registry of canonical fields
#[derive(Debug, Clone)]
pub struct FieldCatalog {
    version: &'static str,
    specs: IndexMap<CanonicalField, FieldSpec>,
    names: HashMap<String, CanonicalField>,
    event_statuses: EventStatusTable,
}

impl FieldCatalog {
    /// The process-wide catalog, loaded and checked once
    pub fn global() -> Result<&'static FieldCatalog> {
        GLOBAL.as_ref().map_err(Clone::clone)
    }

    /// Load the built-in table and run the self-check
    pub fn load() -> Result<Self> {
        let catalog = Self::from_specs(CATALOG_VERSION, BUILTIN_FIELDS.iter().copied())?;
        for field in CanonicalField::ALL {
            if !catalog.specs.contains_key(&field) {
                return Err(CriteriaError::catalog(format!("{} has no field spec", field)));
            }
        }
        tracing::debug!(
            version = catalog.version,
            fields = catalog.specs.len(),
            names = catalog.names.len(),
            "field catalog loaded"
        );
        Ok(catalog)
    }

    /// Build a catalog from arbitrary specs, enforcing:
    /// - one spec per canonical field
    /// - every name resolves to exactly one field
    /// - every field accepts at least one expression kind
    /// - lookup aliases are unique
    pub fn from_specs(
        version: &'static str,
        specs: impl IntoIterator<Item = FieldSpec>,
    ) -> Result<Self> {
        let mut by_field = IndexMap::new();
        let mut names = HashMap::new();
        let mut lookup_aliases: HashMap<&'static str, CanonicalField> = HashMap::new();

        for spec in specs {
            if spec.accepts.is_empty() {
                return Err(CriteriaError::catalog(format!(
                    "{} accepts no expression kinds",
                    spec.field
                )));
            }
            if let ColumnExpr::Lookup { alias, .. } = spec.column {
                if let Some(other) = lookup_aliases.insert(alias, spec.field) {
                    return Err(CriteriaError::catalog(format!(
                        "lookup alias '{}' used by both {} and {}",
                        alias, other, spec.field
                    )));
                }
            }
            for name in spec.names() {
                match names.insert(name.clone(), spec.field) {
                    Some(other) if other != spec.field => {
                        return Err(CriteriaError::catalog(format!(
                            "name '{}' maps to both {} and {}",
                            name, other, spec.field
                        )));
                    }
                    _ => {}
                }
            }
            if by_field.insert(spec.field, spec).is_some() {
                return Err(CriteriaError::catalog(format!(
                    "{} is declared twice",
                    spec.field
                )));
            }
        }

        Ok(Self {
            version,
            specs: by_field,
            names,
            event_statuses: EventStatusTable::builtin(),
        })
    }

    pub fn version(&self) -> &'static str {
        self.version
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Get the spec for a canonical field
    pub fn spec(&self, field: CanonicalField) -> Result<&FieldSpec> {
        self.specs
            .get(&field)
            .ok_or_else(|| CriteriaError::catalog(format!("{} has no field spec", field)))
    }

    /// Resolve a raw, loosely-cased field name
    pub fn resolve(&self, raw: &str) -> Option<CanonicalField> {
        self.names.get(&normalize_key(raw)).copied()
    }

    /// Closest known name to an unknown one, if any is close enough
    pub fn suggest(&self, raw: &str) -> Option<String> {
        let key = normalize_key(raw);
        self.names
            .keys()
            .map(|name| (name, strsim::jaro_winkler(&key, name)))
            .filter(|(_, score)| *score >= SUGGESTION_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(name, _)| name.clone())
    }

    pub fn event_statuses(&self) -> &EventStatusTable {
        &self.event_statuses
    }

    /// Iterate specs in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &FieldSpec> {
        self.specs.values()
    }
}
