//! Expression kinds and kind sets

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of an [`Expression`](crate::Expression)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpressionKind {
    Literal,
    Null,
    Unchanged,
    NotChecked,
    Today,
    RelativeDate,
    NumericComparison,
    NumericRange,
    AgeYearsDays,
}

impl ExpressionKind {
    /// All kinds in parse-priority order
    pub const ALL: [ExpressionKind; 9] = [
        Self::Null,
        Self::Unchanged,
        Self::NotChecked,
        Self::Today,
        Self::RelativeDate,
        Self::NumericRange,
        Self::NumericComparison,
        Self::AgeYearsDays,
        Self::Literal,
    ];

    /// Sentinels never produce a predicate
    pub const fn is_sentinel(&self) -> bool {
        matches!(self, Self::Unchanged | Self::NotChecked)
    }

    const fn bit(&self) -> u16 {
        1 << (*self as u16)
    }

    /// Human-readable name used in error messages
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Literal => "literal",
            Self::Null => "null",
            Self::Unchanged => "unchanged",
            Self::NotChecked => "not-checked",
            Self::Today => "today",
            Self::RelativeDate => "relative date",
            Self::NumericComparison => "numeric comparison",
            Self::NumericRange => "numeric range",
            Self::AgeYearsDays => "age years/days",
        }
    }
}

impl fmt::Display for ExpressionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of expression kinds a field accepts
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KindSet(u16);

impl KindSet {
    /// The empty set
    pub const EMPTY: KindSet = KindSet(0);

    /// Build a set from a list of kinds
    pub const fn of(kinds: &[ExpressionKind]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < kinds.len() {
            bits |= kinds[i].bit();
            i += 1;
        }
        Self(bits)
    }

    /// Add a kind
    pub const fn with(self, kind: ExpressionKind) -> Self {
        Self(self.0 | kind.bit())
    }

    /// Check membership
    pub const fn contains(&self, kind: ExpressionKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Check if the set is empty
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of kinds in the set
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate the kinds in parse-priority order
    pub fn iter(&self) -> impl Iterator<Item = ExpressionKind> + '_ {
        ExpressionKind::ALL.into_iter().filter(|k| self.contains(*k))
    }
}

impl fmt::Debug for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl fmt::Display for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter().map(|k| k.name()).collect();
        write!(f, "{}", names.join(", "))
    }
}

impl FromIterator<ExpressionKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = ExpressionKind>>(iter: I) -> Self {
        iter.into_iter().fold(KindSet::EMPTY, KindSet::with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        const DATES: KindSet = KindSet::of(&[
            ExpressionKind::Literal,
            ExpressionKind::Null,
            ExpressionKind::Today,
        ]);
        assert!(DATES.contains(ExpressionKind::Today));
        assert!(!DATES.contains(ExpressionKind::NumericRange));
        assert_eq!(DATES.len(), 3);
    }

    #[test]
    fn test_display_in_priority_order() {
        let set: KindSet = [ExpressionKind::Literal, ExpressionKind::Null].into_iter().collect();
        assert_eq!(set.to_string(), "null, literal");
    }

    #[test]
    fn test_empty() {
        assert!(KindSet::EMPTY.is_empty());
        assert!(!KindSet::EMPTY.with(ExpressionKind::AgeYearsDays).is_empty());
    }
}
