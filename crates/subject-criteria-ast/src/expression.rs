//! Typed expected-value expressions

use crate::{AnchorOccurrence, ComparisonOp, ExpressionKind, OffsetKind, RawValue};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A date defined relative to an event in the subject's history,
/// e.g. "2 years from earliest S10 event"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelativeDate {
    /// Anchor text as written, resolved to an event status by the compiler
    pub anchor_event: String,
    /// Whole years added to the anchor date
    pub offset_years: u32,
    /// "from" or "since"
    pub offset_kind: OffsetKind,
    /// Which occurrence of the anchor to use
    pub occurrence: AnchorOccurrence,
}

impl fmt::Display for RelativeDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = if self.offset_years == 1 { "year" } else { "years" };
        write!(
            f,
            "{} {} {} {} {} event",
            self.offset_years, unit, self.offset_kind, self.occurrence, self.anchor_event
        )
    }
}

/// The parsed form of one raw expected value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expression {
    /// Exact-match comparison against the raw value
    Literal(RawValue),
    /// Column IS NULL
    Null,
    /// No change expected since a prior step; not verified
    Unchanged,
    /// Explicitly skipped ("# ..." or "Not checking ...")
    NotChecked {
        /// The author's note, verbatim
        note: String,
    },
    /// Column equals the current calendar date
    Today,
    /// Column equals a date offset from an anchor event
    RelativeDate(RelativeDate),
    /// Column compared against a number
    NumericComparison { op: ComparisonOp, value: Decimal },
    /// Column within an inclusive range
    NumericRange { min: Decimal, max: Decimal },
    /// Age target "Y/D": exactly `years` years and `days` days old today
    AgeYearsDays { years: u32, days: u32 },
}

impl Expression {
    /// Get the expression kind
    pub fn kind(&self) -> ExpressionKind {
        match self {
            Self::Literal(_) => ExpressionKind::Literal,
            Self::Null => ExpressionKind::Null,
            Self::Unchanged => ExpressionKind::Unchanged,
            Self::NotChecked { .. } => ExpressionKind::NotChecked,
            Self::Today => ExpressionKind::Today,
            Self::RelativeDate(_) => ExpressionKind::RelativeDate,
            Self::NumericComparison { .. } => ExpressionKind::NumericComparison,
            Self::NumericRange { .. } => ExpressionKind::NumericRange,
            Self::AgeYearsDays { .. } => ExpressionKind::AgeYearsDays,
        }
    }

    /// Sentinels are excluded from predicate generation
    pub fn is_sentinel(&self) -> bool {
        self.kind().is_sentinel()
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(value) => write!(f, "{}", value),
            Self::Null => write!(f, "Null"),
            Self::Unchanged => write!(f, "Unchanged"),
            Self::NotChecked { note } => write!(f, "{}", note),
            Self::Today => write!(f, "Today"),
            Self::RelativeDate(rel) => write!(f, "{}", rel),
            Self::NumericComparison { op, value } => write!(f, "{} {}", op, value),
            Self::NumericRange { min, max } => write!(f, "Between {} and {}", min, max),
            Self::AgeYearsDays { years, days } => write!(f, "{}/{}", years, days),
        }
    }
}
