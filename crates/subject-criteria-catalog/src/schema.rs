//! Schema references: tables, columns, joins and derived column expressions
//!
//! Every table reachable from the subject anchor is joined as an at-most-one-row
//! relation, so adding a join never removes or duplicates the subject row.

use serde::Serialize;
use std::fmt;
use subject_criteria_ast::{ExpressionKind, KindSet};

/// A table reachable from the subject anchor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    /// `screening_subject_t ss`, the anchor
    Subject,
    /// `sd_contact_t c`, joined on NHS number
    Contact,
    /// `ep_subject_episode_t ep`, restricted to the subject's latest episode
    LatestEpisode,
}

impl Table {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Subject => "screening_subject_t",
            Self::Contact => "sd_contact_t",
            Self::LatestEpisode => "ep_subject_episode_t",
        }
    }

    pub const fn alias(&self) -> &'static str {
        match self {
            Self::Subject => "ss",
            Self::Contact => "c",
            Self::LatestEpisode => "ep",
        }
    }

    /// Join from the anchor; `None` for the anchor itself
    pub fn join(&self) -> Option<Join> {
        let sql = match self {
            Self::Subject => return None,
            Self::Contact => {
                "LEFT JOIN sd_contact_t c ON c.nhs_number = ss.subject_nhs_number".to_string()
            }
            Self::LatestEpisode => concat!(
                "LEFT JOIN ep_subject_episode_t ep",
                " ON ep.screening_subject_id = ss.screening_subject_id",
                " AND ep.subject_epis_id = (SELECT MAX(epx.subject_epis_id)",
                " FROM ep_subject_episode_t epx",
                " WHERE epx.screening_subject_id = ss.screening_subject_id)"
            )
            .to_string(),
        };
        Some(Join {
            alias: self.alias(),
            sql,
        })
    }
}

/// A join clause, identified by the alias it introduces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub alias: &'static str,
    pub sql: String,
}

/// A physical column on a reachable table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub table: Table,
    pub column: &'static str,
}

impl ColumnRef {
    pub const fn new(table: Table, column: &'static str) -> Self {
        Self { table, column }
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table.alias(), self.column)
    }
}

/// How a `Yes`/`No` flag field is probed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagProbe {
    /// Yes when the column is not null
    NotNull(ColumnRef),
    /// Yes when the correlated `SELECT 1 ...` probe returns a row
    Exists {
        probe: &'static str,
        requires: Table,
    },
}

/// The column or derived expression a field compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnExpr {
    /// Plain column comparison
    Column(ColumnRef),
    /// Id column resolved to its `valid_values` description under its own alias
    Lookup { id: ColumnRef, alias: &'static str },
    /// Event-status id column, matched through the event-status table
    EventStatus(ColumnRef),
    /// Whole years between a date of birth and today
    AgeInYears(ColumnRef),
    /// Date of birth matched against an exact years/days age
    AgeYearsDays(ColumnRef),
    /// Existence or not-null probe
    Flag(FlagProbe),
}

impl ColumnExpr {
    /// The physical column the expression is built on, if any
    pub fn column(&self) -> Option<ColumnRef> {
        match self {
            Self::Column(col)
            | Self::Lookup { id: col, .. }
            | Self::EventStatus(col)
            | Self::AgeInYears(col)
            | Self::AgeYearsDays(col)
            | Self::Flag(FlagProbe::NotNull(col)) => Some(*col),
            Self::Flag(FlagProbe::Exists { .. }) => None,
        }
    }

    /// The table this expression needs joined
    pub fn table(&self) -> Table {
        match self {
            Self::Flag(FlagProbe::Exists { requires, .. }) => *requires,
            _ => self.column().map_or(Table::Subject, |col| col.table),
        }
    }

    /// Joins needed to evaluate this expression, in dependency order
    pub fn joins(&self) -> Vec<Join> {
        let mut joins: Vec<Join> = self.table().join().into_iter().collect();
        if let Self::Lookup { id, alias } = *self {
            joins.push(Join {
                alias,
                sql: format!(
                    "LEFT JOIN valid_values {alias} ON {alias}.valid_value_id = {id}"
                ),
            });
        }
        joins
    }
}

/// The type a field's literals are validated and bound as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    Text,
    Integer,
    Date,
    Lookup,
    EventStatus,
    Flag,
    AgeYears,
    AgeYearsDays,
}

impl ValueType {
    /// Expression kinds a field of this type accepts unless overridden
    pub const fn default_kinds(&self) -> KindSet {
        use ExpressionKind::{
            AgeYearsDays, Literal, Null, NumericComparison, NumericRange, RelativeDate, Today,
        };
        match self {
            Self::Text | Self::Lookup | Self::EventStatus => KindSet::of(&[Literal, Null]),
            Self::Integer => KindSet::of(&[Literal, Null, NumericComparison, NumericRange]),
            Self::Date => KindSet::of(&[Literal, Null, Today, RelativeDate]),
            Self::Flag => KindSet::of(&[Literal]),
            Self::AgeYears => KindSet::of(&[Literal, NumericComparison, NumericRange]),
            Self::AgeYearsDays => KindSet::of(&[AgeYearsDays]),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Date => "date",
            Self::Lookup => "lookup",
            Self::EventStatus => "event status",
            Self::Flag => "flag",
            Self::AgeYears => "age (years)",
            Self::AgeYearsDays => "age (years/days)",
        };
        f.write_str(name)
    }
}
