//! Expected-value rules, tried in priority order

use crate::combinators::{
    PResult, Input, at_end, backtrack, decimal, keyword, lit, unsigned, ws, ws1,
};
use subject_criteria_ast::{
    AnchorOccurrence, ComparisonOp, Expression, OffsetKind, RawValue, RelativeDate,
};
use winnow::combinator::{alt, opt, terminated};
use winnow::prelude::*;

/// Parse one raw expected value; never fails, falling back to a literal
pub fn parse_value(raw: &RawValue) -> Expression {
    match raw {
        RawValue::Number(_) => Expression::Literal(raw.clone()),
        RawValue::Text(text) => parse_text(text).unwrap_or_else(|| Expression::Literal(raw.clone())),
    }
}

/// Try every rule on a text value; `None` means "literal"
fn parse_text(text: &str) -> Option<Expression> {
    let trimmed = text.trim();

    if trimmed.eq_ignore_ascii_case("null") {
        return Some(Expression::Null);
    }
    if trimmed.eq_ignore_ascii_case("unchanged") {
        return Some(Expression::Unchanged);
    }
    if is_not_checked(trimmed) {
        return Some(Expression::NotChecked {
            note: text.to_string(),
        });
    }
    if trimmed.eq_ignore_ascii_case("today") {
        return Some(Expression::Today);
    }

    let rules: [fn(&mut Input<'_>) -> PResult<Expression>; 4] =
        [relative_date, numeric_range, numeric_comparison, age_years_days];
    rules.into_iter().find_map(|rule| whole(trimmed, rule))
}

fn is_not_checked(trimmed: &str) -> bool {
    const PREFIX: &str = "not checking";
    trimmed.starts_with('#')
        || trimmed
            .get(..PREFIX.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(PREFIX))
}

/// Run a rule and require it to consume the whole value
fn whole(text: &str, rule: fn(&mut Input<'_>) -> PResult<Expression>) -> Option<Expression> {
    let mut input = text;
    let expr = rule(&mut input).ok()?;
    at_end(&mut input).then_some(expr)
}

/// `<int> year(s) from|since [earliest|latest] <anchor> event`
fn relative_date(input: &mut Input<'_>) -> PResult<Expression> {
    let offset_years = unsigned(input)?;
    ws1(input)?;
    keyword("year").parse_next(input)?;
    opt(keyword("s")).parse_next(input)?;
    ws1(input)?;
    let offset_kind = alt((
        keyword("from").value(OffsetKind::From),
        keyword("since").value(OffsetKind::Since),
    ))
    .parse_next(input)?;
    ws1(input)?;
    let occurrence = opt(terminated(
        alt((
            keyword("earliest").value(AnchorOccurrence::Earliest),
            keyword("latest").value(AnchorOccurrence::Latest),
        )),
        ws1,
    ))
    .parse_next(input)?;
    let anchor_event = anchor_text(input)?;

    Ok(Expression::RelativeDate(RelativeDate {
        anchor_event,
        offset_years,
        offset_kind,
        occurrence: occurrence.unwrap_or_default(),
    }))
}

/// Everything up to a trailing, whitespace-separated "event"
fn anchor_text(input: &mut Input<'_>) -> PResult<String> {
    let text: &str = *input;
    let trimmed = text.trim_end();
    let lower = trimmed.to_ascii_lowercase();
    let Some(body) = lower.strip_suffix("event") else {
        return backtrack();
    };
    if !body.ends_with(char::is_whitespace) {
        return backtrack();
    }
    let anchor = trimmed[..body.len()].trim();
    if anchor.is_empty() {
        return backtrack();
    }
    *input = &text[text.len()..];
    Ok(anchor.to_string())
}

/// `between <num> and <num>`
fn numeric_range(input: &mut Input<'_>) -> PResult<Expression> {
    keyword("between").parse_next(input)?;
    ws1(input)?;
    let min = decimal(input)?;
    ws1(input)?;
    keyword("and").parse_next(input)?;
    ws1(input)?;
    let max = decimal(input)?;
    Ok(Expression::NumericRange { min, max })
}

/// `(<|>|<=|>=) *<num>`
fn numeric_comparison(input: &mut Input<'_>) -> PResult<Expression> {
    let op = alt((
        lit(">=").value(ComparisonOp::GreaterOrEqual),
        lit("<=").value(ComparisonOp::LessOrEqual),
        lit(">").value(ComparisonOp::Greater),
        lit("<").value(ComparisonOp::Less),
    ))
    .parse_next(input)?;
    ws(input)?;
    let value = decimal(input)?;
    Ok(Expression::NumericComparison { op, value })
}

/// `<int>/<int>`
fn age_years_days(input: &mut Input<'_>) -> PResult<Expression> {
    let years = unsigned(input)?;
    lit("/").parse_next(input)?;
    let days = unsigned(input)?;
    Ok(Expression::AgeYearsDays { years, days })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_text_keeps_case() {
        let mut input = "A183 - Practitioner Clinic  event ";
        assert_eq!(anchor_text(&mut input).unwrap(), "A183 - Practitioner Clinic");
        assert!(input.is_empty());
    }

    #[test]
    fn test_anchor_text_needs_event_word() {
        let mut glued = "S10event";
        assert!(anchor_text(&mut glued).is_err());

        let mut missing = "S10";
        assert!(anchor_text(&mut missing).is_err());

        let mut empty = " event";
        assert!(anchor_text(&mut empty).is_err());
    }

    #[test]
    fn test_whole_rejects_trailing_text() {
        assert!(whole("> 28 years", numeric_comparison).is_none());
        assert!(whole("> 28 ", numeric_comparison).is_some());
    }
}
