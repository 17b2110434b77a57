//! SQL dialect renderings
//!
//! Only the handful of date and paging constructs the compiler emits differ
//! between stores. Bind variables use `:name` syntax in every dialect.
//!
//! Year arithmetic follows `ADD_MONTHS`: a date on the last day of its month
//! lands on the last day of the target month, so 29 February plus one year is
//! 28 February and 28 February 2023 plus one year is 29 February 2024. SQLite
//! date modifiers would roll the first case over to 1 March, so the SQLite
//! rendering special-cases month ends.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target SQL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    Sqlite,
    Oracle,
}

impl Dialect {
    /// The store's current calendar date
    pub const fn current_date(&self) -> &'static str {
        match self {
            Self::Sqlite => "date('now', 'localtime')",
            Self::Oracle => "TRUNC(SYSDATE)",
        }
    }

    /// Truncate a date or timestamp expression to its calendar date
    pub fn date_value(&self, expr: &str) -> String {
        match self {
            Self::Sqlite => format!("date({})", expr),
            Self::Oracle => format!("TRUNC({})", expr),
        }
    }

    /// Add a whole number of years to a date
    pub fn add_years(&self, date: &str, years: &str) -> String {
        match self {
            Self::Sqlite => sqlite_shift_years(date, &format!("'+' || {} || ' years'", years)),
            Self::Oracle => format!("ADD_MONTHS({}, 12 * {})", date, years),
        }
    }

    /// Go back a number of years, then a number of days, from a date
    pub fn subtract_years_days(&self, date: &str, years: &str, days: &str) -> String {
        match self {
            Self::Sqlite => format!(
                "date({}, '-' || {} || ' days')",
                sqlite_shift_years(date, &format!("'-' || {} || ' years'", years)),
                days
            ),
            Self::Oracle => format!("ADD_MONTHS({}, -12 * {}) - {}", date, years, days),
        }
    }

    /// Completed years between a date of birth and a date
    pub fn age_in_years(&self, dob: &str, today: &str) -> String {
        match self {
            Self::Sqlite => format!(
                "(CAST(strftime('%Y', {today}) AS INTEGER) - CAST(strftime('%Y', {dob}) AS INTEGER) \
                 - (strftime('%m-%d', {today}) < strftime('%m-%d', {dob})))"
            ),
            Self::Oracle => format!("TRUNC(MONTHS_BETWEEN({}, {}) / 12)", today, dob),
        }
    }

    /// Row-limiting clause appended after `ORDER BY`
    pub fn limit(&self, bind: &str) -> String {
        match self {
            Self::Sqlite => format!("LIMIT {}", bind),
            Self::Oracle => format!("FETCH FIRST {} ROWS ONLY", bind),
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Sqlite => "sqlite",
            Self::Oracle => "oracle",
        }
    }
}

/// Shift by a signed years modifier, pinning month ends to month ends
fn sqlite_shift_years(date: &str, modifier: &str) -> String {
    format!(
        "CASE WHEN {date} = date({date}, 'start of month', '+1 month', '-1 day') \
         THEN date({date}, 'start of month', {modifier}, '+1 month', '-1 day') \
         ELSE date({date}, {modifier}) END"
    )
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "oracle" => Ok(Self::Oracle),
            other => Err(format!("unknown dialect '{}' (expected sqlite or oracle)", other)),
        }
    }
}
