//! Per-field catalog entries

use crate::field::CanonicalField;
use crate::schema::{ColumnExpr, Join, ValueType};
use subject_criteria_ast::KindSet;

/// Everything the compiler needs to know about one canonical field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub field: CanonicalField,
    /// Extra names accepted besides the canonical one
    pub aliases: &'static [&'static str],
    pub column: ColumnExpr,
    pub value_type: ValueType,
    pub accepts: KindSet,
}

impl FieldSpec {
    /// Create a spec accepting the value type's default kinds
    pub const fn new(field: CanonicalField, value_type: ValueType, column: ColumnExpr) -> Self {
        Self {
            field,
            aliases: &[],
            column,
            value_type,
            accepts: value_type.default_kinds(),
        }
    }

    pub const fn with_aliases(mut self, aliases: &'static [&'static str]) -> Self {
        self.aliases = aliases;
        self
    }

    pub const fn accepting(mut self, accepts: KindSet) -> Self {
        self.accepts = accepts;
        self
    }

    /// Joins from the subject anchor, in dependency order
    pub fn join_path(&self) -> Vec<Join> {
        self.column.joins()
    }

    /// Every normalized name that resolves to this field
    pub fn names(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.field.as_str())
            .chain(self.aliases.iter().copied())
            .map(normalize_key)
    }
}

/// Lower-case, treat `_` as a space and collapse runs of whitespace
pub fn normalize_key(key: &str) -> String {
    key.to_lowercase()
        .replace('_', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
