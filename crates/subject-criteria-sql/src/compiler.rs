//! Criteria to SQL compiler
//!
//! Turns normalized criteria into a [`CriteriaPlan`] (parsing every value and
//! generating every predicate up front), then assembles plans into
//! parameterized statements. No expected value is ever interpolated into SQL
//! text: each one travels as a named bind variable.

use crate::dialect::Dialect;
use crate::literal;
use crate::plan::{CriteriaPlan, PlannedCriterion, Predicate};
use crate::query::{CompileMode, CompiledQuery};
use crate::value::SqlValue;
use chrono::NaiveDate;
use indexmap::IndexMap;
use subject_criteria_ast::{AnchorOccurrence, Expression, RawValue, RelativeDate};
use subject_criteria_catalog::{
    CanonicalField, ColumnExpr, ColumnRef, FieldCatalog, FieldSpec, FlagProbe, Join,
    NormalizedCriteria, Table, ValueType,
};
use subject_criteria_diagnostics::{CriteriaError, Result};
use subject_criteria_parser::ExpressionParser;

const SELECT_LIST: &str = "SELECT ss.screening_subject_id, ss.subject_nhs_number";
const NHS_NUMBER_BIND: &str = "nhs_number";
const TODAY_BIND: &str = "today";
const LIMIT_BIND: &str = "limit";

/// Compiles criteria against a field catalog
#[derive(Debug, Clone)]
pub struct QueryCompiler<'a> {
    catalog: &'a FieldCatalog,
    parser: ExpressionParser,
    dialect: Dialect,
    today: Option<NaiveDate>,
}

impl<'a> QueryCompiler<'a> {
    pub fn new(catalog: &'a FieldCatalog) -> Self {
        Self {
            catalog,
            parser: ExpressionParser::new(),
            dialect: Dialect::default(),
            today: None,
        }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    /// Use a fixed calendar date instead of the store clock
    pub fn with_today(mut self, today: Option<NaiveDate>) -> Self {
        self.today = today;
        self
    }

    pub fn catalog(&self) -> &'a FieldCatalog {
        self.catalog
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Parse and validate every criterion
    ///
    /// With an anchor NHS number, an NHS-number criterion is dropped when it
    /// names the same subject and rejected when it names another.
    pub fn plan(
        &self,
        nhs_number: Option<&str>,
        criteria: &NormalizedCriteria,
    ) -> Result<CriteriaPlan> {
        let mut planned = Vec::with_capacity(criteria.len());

        for (&field, criterion) in criteria {
            let spec = self.catalog.spec(field)?;
            let expression =
                self.parser
                    .parse_for(field.as_str(), spec.accepts, &criterion.raw_expected)?;

            if let (CanonicalField::NhsNumber, Some(anchor)) = (field, nhs_number) {
                if let Expression::Literal(raw) = &expression {
                    let found = raw.to_string();
                    if found.trim() != anchor {
                        return Err(CriteriaError::conflicting_nhs_number(anchor, found));
                    }
                }
                continue;
            }

            let predicate = self.predicate(spec, &expression)?;
            planned.push(PlannedCriterion {
                field,
                criterion: criterion.clone(),
                expression,
                predicate,
            });
        }

        Ok(CriteriaPlan {
            nhs_number: nhs_number.map(str::to_string),
            criteria: planned,
        })
    }

    /// Assemble a statement from a plan
    pub fn compile(&self, plan: &CriteriaPlan, mode: CompileMode) -> Result<CompiledQuery> {
        let selected: Vec<&PlannedCriterion> = match mode {
            CompileMode::Combined | CompileMode::Selection { .. } => plan.checked().collect(),
            CompileMode::Isolated(field) => match plan.get(field) {
                Some(criterion) if criterion.is_checked() => vec![criterion],
                _ => return Err(CriteriaError::nothing_to_isolate(field.as_str())),
            },
        };

        let mut select = SelectBuilder::default();
        if let Some(nhs_number) = plan.nhs_number() {
            select.anchor(nhs_number);
        }
        for criterion in &selected {
            if let Some(predicate) = &criterion.predicate {
                select.add(criterion.field, predicate);
            }
        }
        if select.uses_today {
            if let Some(today) = self.today {
                select.binds.insert(TODAY_BIND.to_string(), SqlValue::Date(today));
            }
        }

        let limit = match mode {
            CompileMode::Selection { limit } => Some(limit),
            _ => None,
        };
        let query = select.finish(self.dialect, limit);
        tracing::debug!(
            %mode,
            dialect = %self.dialect,
            sql = %query.sql,
            binds = ?query.binds,
            "compiled query"
        );
        Ok(query)
    }

    /// The NHS-number-only statement used to resolve the subject row
    pub fn compile_subject_lookup(&self, nhs_number: &str) -> CompiledQuery {
        let mut select = SelectBuilder::default();
        select.anchor(nhs_number);
        select.finish(self.dialect, None)
    }

    fn predicate(&self, spec: &FieldSpec, expr: &Expression) -> Result<Option<Predicate>> {
        if expr.is_sentinel() {
            return Ok(None);
        }

        let mut b = PredicateBuilder::new(spec.field, self.dialect, self.today.is_some());
        let d = self.dialect;
        let sql = match expr {
            Expression::Null => match spec.column.column() {
                Some(col) => format!("{} IS NULL", col),
                None => return Err(unsupported(spec, expr)),
            },
            Expression::Literal(raw) => self.literal(&mut b, spec, expr, raw)?,
            Expression::Today => {
                let col = date_column(spec, expr)?;
                format!("{} = {}", d.date_value(&col.to_string()), b.today())
            }
            Expression::RelativeDate(rel) => self.relative_date(&mut b, spec, expr, rel)?,
            Expression::NumericComparison { op, value } => {
                let target = numeric_target(&mut b, spec, expr)?;
                format!("{} {} {}", target, op.symbol(), b.bind("", *value))
            }
            Expression::NumericRange { min, max } => {
                literal::range(spec.field.as_str(), *min, *max)?;
                let target = numeric_target(&mut b, spec, expr)?;
                format!(
                    "{} BETWEEN {} AND {}",
                    target,
                    b.bind("min", *min),
                    b.bind("max", *max)
                )
            }
            Expression::AgeYearsDays { years, days } => {
                let ColumnExpr::AgeYearsDays(dob) = spec.column else {
                    return Err(unsupported(spec, expr));
                };
                let today = b.today();
                let years = b.bind("years", i64::from(*years));
                let days = b.bind("days", i64::from(*days));
                format!(
                    "{} = {}",
                    d.date_value(&dob.to_string()),
                    d.subtract_years_days(&today, &years, &days)
                )
            }
            Expression::Unchanged | Expression::NotChecked { .. } => return Ok(None),
        };

        Ok(Some(Predicate {
            sql,
            binds: b.binds,
            joins: spec.join_path(),
            uses_today: b.uses_today,
        }))
    }

    fn literal(
        &self,
        b: &mut PredicateBuilder,
        spec: &FieldSpec,
        expr: &Expression,
        raw: &RawValue,
    ) -> Result<String> {
        let name = spec.field.as_str();
        let d = self.dialect;
        let sql = match spec.column {
            ColumnExpr::Column(col) => match spec.value_type {
                ValueType::Date => {
                    let date = literal::date(name, raw)?;
                    format!("{} = {}", d.date_value(&col.to_string()), b.bind("", date))
                }
                ValueType::Integer => {
                    format!("{} = {}", col, b.bind("", literal::integer(name, raw)?))
                }
                _ => format!("{} = {}", col, b.bind("", literal::text(raw))),
            },
            ColumnExpr::Lookup { alias, .. } => {
                format!("{}.description = {}", alias, b.bind("", literal::text(raw)))
            }
            ColumnExpr::EventStatus(col) => {
                let text = literal::text(raw);
                let status = self
                    .catalog
                    .event_statuses()
                    .lookup(&text)
                    .ok_or_else(|| CriteriaError::unknown_event_status(name, text.trim()))?;
                format!("{} = {}", col, b.bind("", status.id))
            }
            ColumnExpr::AgeInYears(dob) => {
                let years = literal::integer(name, raw)?;
                let age = d.age_in_years(&dob.to_string(), &b.today());
                format!("{} = {}", age, b.bind("", years))
            }
            ColumnExpr::Flag(probe) => {
                let expected = literal::flag(name, raw)?;
                match (probe, expected) {
                    (FlagProbe::NotNull(col), true) => format!("{} IS NOT NULL", col),
                    (FlagProbe::NotNull(col), false) => format!("{} IS NULL", col),
                    (FlagProbe::Exists { probe, .. }, true) => format!("EXISTS ({})", probe),
                    (FlagProbe::Exists { probe, .. }, false) => format!("NOT EXISTS ({})", probe),
                }
            }
            ColumnExpr::AgeYearsDays(_) => return Err(unsupported(spec, expr)),
        };
        Ok(sql)
    }

    /// Column equals the anchor event's date plus whole years
    ///
    /// The aggregate runs over the subject's whole event history as a
    /// scalar subquery; with no matching event it is null and the
    /// comparison is false.
    fn relative_date(
        &self,
        b: &mut PredicateBuilder,
        spec: &FieldSpec,
        expr: &Expression,
        rel: &RelativeDate,
    ) -> Result<String> {
        let col = date_column(spec, expr)?;
        let name = spec.field.as_str();
        let status = self
            .catalog
            .event_statuses()
            .lookup(&rel.anchor_event)
            .ok_or_else(|| CriteriaError::unknown_event_status(name, rel.anchor_event.as_str()))?;

        let d = self.dialect;
        let anchor = b.bind("anchor", status.id);
        let years = b.bind("years", i64::from(rel.offset_years));
        let aggregate = match rel.occurrence {
            AnchorOccurrence::Earliest => "MIN",
            AnchorOccurrence::Latest => "MAX",
        };
        let anchor_date = d.date_value(&format!("{}(ev.datestamp)", aggregate));

        Ok(format!(
            "{} = (SELECT {} FROM ep_events_t ev \
             INNER JOIN ep_subject_episode_t eve ON eve.subject_epis_id = ev.subject_epis_id \
             WHERE eve.screening_subject_id = ss.screening_subject_id \
             AND ev.event_status_id = {})",
            d.date_value(&col.to_string()),
            d.add_years(&anchor_date, &years),
            anchor
        ))
    }
}

fn unsupported(spec: &FieldSpec, expr: &Expression) -> CriteriaError {
    CriteriaError::unsupported_expression(spec.field.as_str(), expr.to_string(), expr.kind().name())
}

fn date_column(spec: &FieldSpec, expr: &Expression) -> Result<ColumnRef> {
    match spec.column {
        ColumnExpr::Column(col) if spec.value_type == ValueType::Date => Ok(col),
        _ => Err(unsupported(spec, expr)),
    }
}

/// The numeric value a comparison or range applies to
fn numeric_target(b: &mut PredicateBuilder, spec: &FieldSpec, expr: &Expression) -> Result<String> {
    match spec.column {
        ColumnExpr::Column(col) if spec.value_type == ValueType::Integer => Ok(col.to_string()),
        ColumnExpr::AgeInYears(dob) => {
            let today = b.today();
            Ok(b.dialect.age_in_years(&dob.to_string(), &today))
        }
        _ => Err(unsupported(spec, expr)),
    }
}

/// Collects bind variables for one field's predicate
struct PredicateBuilder {
    field: CanonicalField,
    dialect: Dialect,
    pinned_today: bool,
    binds: Vec<(String, SqlValue)>,
    uses_today: bool,
}

impl PredicateBuilder {
    fn new(field: CanonicalField, dialect: Dialect, pinned_today: bool) -> Self {
        Self {
            field,
            dialect,
            pinned_today,
            binds: Vec::new(),
            uses_today: false,
        }
    }

    /// Bind a value as `:<field>` or `:<field>_<suffix>`, returning the placeholder
    fn bind(&mut self, suffix: &str, value: impl Into<SqlValue>) -> String {
        let name = if suffix.is_empty() {
            self.field.as_str().to_string()
        } else {
            format!("{}_{}", self.field.as_str(), suffix)
        };
        let placeholder = format!(":{}", name);
        self.binds.push((name, value.into()));
        placeholder
    }

    /// The current calendar date, pinned or from the store clock
    fn today(&mut self) -> String {
        self.uses_today = true;
        if self.pinned_today {
            format!(":{}", TODAY_BIND)
        } else {
            self.dialect.current_date().to_string()
        }
    }
}

/// Accumulates joins, predicates and binds for one statement
#[derive(Default)]
struct SelectBuilder {
    joins: IndexMap<&'static str, String>,
    predicates: Vec<String>,
    binds: IndexMap<String, SqlValue>,
    fields: Vec<CanonicalField>,
    uses_today: bool,
}

impl SelectBuilder {
    fn anchor(&mut self, nhs_number: &str) {
        self.predicates
            .push(format!("ss.subject_nhs_number = :{}", NHS_NUMBER_BIND));
        self.binds.insert(
            NHS_NUMBER_BIND.to_string(),
            SqlValue::Text(nhs_number.to_string()),
        );
    }

    fn add(&mut self, field: CanonicalField, predicate: &Predicate) {
        for Join { alias, sql } in &predicate.joins {
            self.joins.entry(*alias).or_insert_with(|| sql.clone());
        }
        self.predicates.push(predicate.sql.clone());
        self.binds.extend(predicate.binds.iter().cloned());
        self.fields.push(field);
        self.uses_today |= predicate.uses_today;
    }

    fn finish(mut self, dialect: Dialect, limit: Option<u32>) -> CompiledQuery {
        let mut sql = format!(
            "{}\nFROM {} {}",
            SELECT_LIST,
            Table::Subject.name(),
            Table::Subject.alias()
        );
        for join in self.joins.values() {
            sql.push('\n');
            sql.push_str(join);
        }
        if !self.predicates.is_empty() {
            sql.push_str("\nWHERE ");
            sql.push_str(&self.predicates.join("\n  AND "));
        }
        if let Some(limit) = limit {
            sql.push_str("\nORDER BY ss.screening_subject_id\n");
            sql.push_str(&dialect.limit(&format!(":{}", LIMIT_BIND)));
            self.binds
                .insert(LIMIT_BIND.to_string(), SqlValue::Integer(i64::from(limit)));
        }
        CompiledQuery {
            sql,
            binds: self.binds,
            fields: self.fields,
        }
    }
}
