//! Operators and qualifiers used inside expressions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Numeric comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComparisonOp {
    /// Less than
    Less,
    /// Less than or equal
    LessOrEqual,
    /// Greater than
    Greater,
    /// Greater than or equal
    GreaterOrEqual,
}

impl ComparisonOp {
    /// Get the operator symbol
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Less => "<",
            Self::LessOrEqual => "<=",
            Self::Greater => ">",
            Self::GreaterOrEqual => ">=",
        }
    }

    /// Apply the operator to two ordered values
    pub fn holds<T: PartialOrd>(&self, left: &T, right: &T) -> bool {
        match self {
            Self::Less => left < right,
            Self::LessOrEqual => left <= right,
            Self::Greater => left > right,
            Self::GreaterOrEqual => left >= right,
        }
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Connective between the year offset and the anchor event
///
/// Both forms offset forward from the anchor: "2 years from X event" and
/// "2 years since X event" name the same date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OffsetKind {
    From,
    Since,
}

impl fmt::Display for OffsetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::From => write!(f, "from"),
            Self::Since => write!(f, "since"),
        }
    }
}

/// Which occurrence of the anchor event in the subject's history to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnchorOccurrence {
    /// The first time the event was recorded
    Earliest,
    /// The most recent time the event was recorded
    #[default]
    Latest,
}

impl fmt::Display for AnchorOccurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Earliest => write!(f, "earliest"),
            Self::Latest => write!(f, "latest"),
        }
    }
}
