//! Expected-value parser using Winnow
//!
//! Turns the free-form expected values test authors write ("Null", "Today",
//! "2 years from earliest S10 event", "Between 60 and 72", "> 28", "65/25")
//! into typed [`Expression`]s. Rules are tried in a fixed priority order and
//! the first match wins; anything unrecognised becomes a literal.
//!
//! Parsing itself never fails. Failure comes from [`ExpressionParser::parse_for`],
//! which rejects an expression whose kind the target field does not accept.

mod combinators;
mod expression;

pub use expression::parse_value;

use subject_criteria_ast::{Expression, KindSet, RawValue};
use subject_criteria_diagnostics::{CriteriaError, Result};

/// Expected-value parser
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpressionParser;

impl ExpressionParser {
    /// Create a parser
    pub fn new() -> Self {
        Self
    }

    /// Parse a raw value without any field context
    pub fn parse(&self, raw: &RawValue) -> Expression {
        parse_value(raw)
    }

    /// Parse a raw value for a field, enforcing the kinds it accepts
    ///
    /// Sentinels (`Unchanged`, `# ...`) produce no predicate and are accepted
    /// by every field.
    pub fn parse_for(&self, field: &str, accepted: KindSet, raw: &RawValue) -> Result<Expression> {
        let expr = parse_value(raw);
        let kind = expr.kind();
        if kind.is_sentinel() || accepted.contains(kind) {
            Ok(expr)
        } else {
            Err(CriteriaError::unsupported_expression(
                field,
                raw.to_string(),
                kind.name(),
            ))
        }
    }
}
