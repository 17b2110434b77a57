//! Field catalog for subject criteria
//!
//! The catalog is the closed, versioned vocabulary of fields a criterion may
//! name. Each [`FieldSpec`] records:
//! - the column or derived expression the field compares against
//! - the join path from the `screening_subject_t` anchor
//! - the value type literals are validated and bound as
//! - the expression kinds the field accepts
//!
//! [`CriteriaNormalizer`] maps loosely-cased caller keys onto
//! [`CanonicalField`]s, and [`EventStatusTable`] resolves event-status codes
//! and descriptions to internal ids.
//!
//! # Example
//!
//! ```
//! use subject_criteria_ast::Criteria;
//! use subject_criteria_catalog::{CanonicalField, CriteriaNormalizer, FieldCatalog};
//!
//! let catalog = FieldCatalog::global()?;
//! let criteria = Criteria::new().with("Screening Status", "Call");
//! let normalized = CriteriaNormalizer::new(catalog).normalize(&criteria)?;
//! assert!(normalized.contains_key(&CanonicalField::ScreeningStatus));
//! # Ok::<(), subject_criteria_diagnostics::CriteriaError>(())
//! ```

mod builtin;
mod catalog;
mod event_status;
mod field;
mod normalize;
mod schema;
mod spec;

pub use builtin::CATALOG_VERSION;
pub use catalog::FieldCatalog;
pub use event_status::{EventStatus, EventStatusTable};
pub use field::CanonicalField;
pub use normalize::{CriteriaNormalizer, NormalizedCriteria};
pub use schema::{ColumnExpr, ColumnRef, FlagProbe, Join, Table, ValueType};
pub use spec::{FieldSpec, normalize_key};
