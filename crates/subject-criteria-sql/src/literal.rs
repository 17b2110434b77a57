//! Literal validation against a field's value type

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use subject_criteria_ast::RawValue;
use subject_criteria_diagnostics::{CriteriaError, Result};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d %b %Y"];

/// Parse a date literal: `2024-03-01`, `01/03/2024` or `1 Mar 2024`
pub(crate) fn date(field: &str, raw: &RawValue) -> Result<NaiveDate> {
    let Some(text) = raw.as_text() else {
        return Err(CriteriaError::invalid_literal(
            field,
            raw.to_string(),
            "expected a date",
        ));
    };
    let text = text.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .ok_or_else(|| {
            CriteriaError::invalid_literal(
                field,
                text,
                "expected a date as YYYY-MM-DD, DD/MM/YYYY or DD Mon YYYY",
            )
        })
}

/// Parse a whole-number literal
pub(crate) fn integer(field: &str, raw: &RawValue) -> Result<i64> {
    let parsed = match raw {
        RawValue::Number(n) => whole(*n),
        RawValue::Text(text) => text.trim().parse::<i64>().ok(),
    };
    parsed.ok_or_else(|| {
        CriteriaError::invalid_literal(field, raw.to_string(), "expected a whole number")
    })
}

/// Parse a `Yes`/`No` flag literal
pub(crate) fn flag(field: &str, raw: &RawValue) -> Result<bool> {
    match raw.as_text().map(str::trim) {
        Some(text) if text.eq_ignore_ascii_case("yes") => Ok(true),
        Some(text) if text.eq_ignore_ascii_case("no") => Ok(false),
        _ => Err(CriteriaError::invalid_literal(
            field,
            raw.to_string(),
            "expected Yes or No",
        )),
    }
}

/// Text literals are compared verbatim; numbers use their written form
pub(crate) fn text(raw: &RawValue) -> String {
    raw.to_string()
}

/// Reject an inverted `Between` range
pub(crate) fn range(field: &str, min: Decimal, max: Decimal) -> Result<()> {
    if min > max {
        return Err(CriteriaError::invalid_literal(
            field,
            format!("Between {} and {}", min, max),
            "range minimum exceeds maximum",
        ));
    }
    Ok(())
}

fn whole(n: Decimal) -> Option<i64> {
    if n.fract().is_zero() { n.to_i64() } else { None }
}
