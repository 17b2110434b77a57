//! Shared fixtures: a miniature screening schema in an in-memory SQLite store

#![allow(dead_code)]

use chrono::{Months, NaiveDate};
use rusqlite::{ToSql, params};
use std::cell::RefCell;
use subject_criteria_diagnostics::ExecutionError;
use subject_criteria_engine::{
    AssertionEngine, EngineConfig, QueryExecutor, RowSet, SqliteConfig, SqliteExecutor,
};
use subject_criteria_sql::CompiledQuery;

pub const NHS: &str = "9990000001";
pub const OTHER_NHS: &str = "9990000002";

pub const S10: i64 = 11198;
pub const A99: i64 = 11111;

const SCHEMA: &str = r#"
CREATE TABLE valid_values (
    valid_value_id INTEGER PRIMARY KEY,
    description TEXT NOT NULL
);

CREATE TABLE screening_subject_t (
    screening_subject_id INTEGER PRIMARY KEY,
    subject_nhs_number TEXT NOT NULL UNIQUE,
    screening_status_id INTEGER,
    ss_reason_for_change_id INTEGER,
    ss_status_change_date TEXT,
    previous_screening_status_id INTEGER,
    screening_due_date TEXT,
    sdd_reason_for_change_id INTEGER,
    sdd_change_date TEXT,
    calculated_sdd TEXT,
    surveillance_screen_due_date TEXT,
    surveillance_sdd_rsn_id INTEGER,
    surveillance_sdd_change_date TEXT,
    calculated_ssdd TEXT,
    lynch_screening_due_date TEXT,
    lynch_sdd_reason_for_change_id INTEGER,
    lynch_sdd_date_of_change TEXT,
    lynch_calculated_sdd TEXT,
    ceased_confirmation_recd_date TEXT,
    ceased_confirmation_details TEXT,
    ceased_confirmation_pio_id INTEGER,
    clinical_reason_for_cease_id INTEGER,
    screening_centre_code TEXT,
    surveillance_review_status_id INTEGER,
    surveillance_review_case_type_id INTEGER,
    surveillance_review_date TEXT,
    manual_cease_requested_id INTEGER,
    lynch_incident_date TEXT
);

CREATE TABLE sd_contact_t (
    contact_id INTEGER PRIMARY KEY,
    nhs_number TEXT NOT NULL UNIQUE,
    date_of_birth TEXT,
    date_of_death TEXT,
    gender_id INTEGER,
    hub_code TEXT,
    gp_practice_code TEXT,
    surname TEXT,
    forename TEXT,
    postcode TEXT
);

CREATE TABLE sd_address_t (
    address_id INTEGER PRIMARY KEY,
    contact_id INTEGER NOT NULL,
    address_type TEXT NOT NULL,
    effective_to TEXT
);

CREATE TABLE ep_subject_episode_t (
    subject_epis_id INTEGER PRIMARY KEY,
    screening_subject_id INTEGER NOT NULL,
    episode_type_id INTEGER,
    episode_status_id INTEGER,
    episode_status_reason_id INTEGER,
    episode_start_date TEXT,
    episode_end_date TEXT,
    latest_event_status_id INTEGER,
    recall_calculation_method_id INTEGER,
    recall_episode_type_id INTEGER,
    recall_surveillance_type_id INTEGER,
    diagnosis_date TEXT,
    diagnosis_date_reason_id INTEGER,
    referral_date TEXT,
    episode_sub_type_id INTEGER,
    episode_status_change_date TEXT,
    recall_change_date TEXT,
    episode_end_reason_id INTEGER,
    accumulated_result_id INTEGER,
    referral_type_id INTEGER,
    referral_reason_id INTEGER,
    diagnosis_date_change_date TEXT
);

CREATE TABLE ep_events_t (
    event_id INTEGER PRIMARY KEY,
    subject_epis_id INTEGER NOT NULL,
    event_status_id INTEGER NOT NULL,
    datestamp TEXT NOT NULL
);

CREATE TABLE ds_colonoscopy_t (dataset_id INTEGER PRIMARY KEY, episode_id INTEGER NOT NULL);
CREATE TABLE ds_cancer_audit_t (dataset_id INTEGER PRIMARY KEY, episode_id INTEGER NOT NULL);
CREATE TABLE ds_mdt_t (dataset_id INTEGER PRIMARY KEY, episode_id INTEGER NOT NULL);
CREATE TABLE ds_pathology_t (dataset_id INTEGER PRIMARY KEY, episode_id INTEGER NOT NULL);
CREATE TABLE ds_radiology_t (dataset_id INTEGER PRIMARY KEY, episode_id INTEGER NOT NULL);

CREATE TABLE appointment_t (
    appointment_id INTEGER PRIMARY KEY,
    subject_epis_id INTEGER NOT NULL,
    cancel_date TEXT,
    attended_date TEXT
);

CREATE TABLE tk_items_t (kit_id TEXT PRIMARY KEY, screening_subject_id INTEGER NOT NULL);
CREATE TABLE lynch_diagnosis_t (lynch_diagnosis_id INTEGER PRIMARY KEY, screening_subject_id INTEGER NOT NULL);

INSERT INTO valid_values (valid_value_id, description) VALUES
    (4001, 'Inactive'),
    (4002, 'Call'),
    (4003, 'Recall'),
    (4004, 'Surveillance'),
    (5001, 'FOBT Screening'),
    (5002, 'Surveillance'),
    (6001, 'Open'),
    (6002, 'Closed'),
    (7001, 'Male'),
    (7002, 'Female'),
    (8001, 'Patient Choice');
"#;

/// Pinned calendar date used by most scenarios
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

pub fn years_before(date: NaiveDate, years: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(12 * years)).unwrap()
}

pub fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn config() -> EngineConfig {
    EngineConfig::default().with_today(today())
}

/// A fresh in-memory store with the schema and lookup values loaded
pub fn store() -> SqliteExecutor {
    let executor = SqliteExecutor::open_in_memory(&SqliteConfig::default()).unwrap();
    executor.with_connection(|conn| conn.execute_batch(SCHEMA)).unwrap();
    executor
}

pub fn exec(store: &SqliteExecutor, sql: &str, values: &[&dyn ToSql]) {
    store
        .with_connection(|conn| conn.execute(sql, values))
        .unwrap();
}

fn lookup_id(store: &SqliteExecutor, description: &str) -> i64 {
    store
        .with_connection(|conn| {
            conn.query_row(
                "SELECT MIN(valid_value_id) FROM valid_values WHERE description = ?1",
                params![description],
                |row| row.get(0),
            )
        })
        .unwrap()
}

/// Insert a subject with a screening status and contact row
pub fn add_subject(store: &SqliteExecutor, id: i64, nhs: &str, status: &str, dob: NaiveDate) {
    let status_id = lookup_id(store, status);
    exec(
        store,
        "INSERT INTO screening_subject_t (screening_subject_id, subject_nhs_number, screening_status_id) \
         VALUES (?1, ?2, ?3)",
        &[&id, &nhs, &status_id],
    );
    exec(
        store,
        "INSERT INTO sd_contact_t (nhs_number, date_of_birth, gp_practice_code) VALUES (?1, ?2, 'A12345')",
        &[&nhs, &iso(dob)],
    );
}

/// Set one column on a subject row
pub fn set_subject(store: &SqliteExecutor, nhs: &str, column: &str, value: &dyn ToSql) {
    let sql = format!(
        "UPDATE screening_subject_t SET {} = ?1 WHERE subject_nhs_number = ?2",
        column
    );
    exec(store, &sql, &[value, &nhs]);
}

/// Insert an episode for a subject
pub fn add_episode(store: &SqliteExecutor, subject_id: i64, episode_id: i64, status: &str) {
    let status_id = lookup_id(store, status);
    let type_id = lookup_id(store, "FOBT Screening");
    exec(
        store,
        "INSERT INTO ep_subject_episode_t \
         (subject_epis_id, screening_subject_id, episode_type_id, episode_status_id, episode_start_date) \
         VALUES (?1, ?2, ?3, ?4, '2023-01-10')",
        &[&episode_id, &subject_id, &type_id, &status_id],
    );
}

pub fn add_event(store: &SqliteExecutor, episode_id: i64, status_id: i64, datestamp: &str) {
    exec(
        store,
        "INSERT INTO ep_events_t (subject_epis_id, event_status_id, datestamp) VALUES (?1, ?2, ?3)",
        &[&episode_id, &status_id, &datestamp],
    );
    exec(
        store,
        "UPDATE ep_subject_episode_t SET latest_event_status_id = ?1 WHERE subject_epis_id = ?2",
        &[&status_id, &episode_id],
    );
}

pub fn engine(store: &SqliteExecutor) -> AssertionEngine<Counting<&SqliteExecutor>> {
    AssertionEngine::with_config(Counting::new(store), config()).unwrap()
}

/// Records every statement passed to the wrapped executor
pub struct Counting<E> {
    inner: E,
    queries: RefCell<Vec<CompiledQuery>>,
}

impl<E> Counting<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            queries: RefCell::new(Vec::new()),
        }
    }

    pub fn count(&self) -> usize {
        self.queries.borrow().len()
    }

    pub fn queries(&self) -> Vec<CompiledQuery> {
        self.queries.borrow().clone()
    }
}

impl<E: QueryExecutor> QueryExecutor for Counting<E> {
    fn execute(&self, query: &CompiledQuery) -> Result<RowSet, ExecutionError> {
        self.queries.borrow_mut().push(query.clone());
        self.inner.execute(query)
    }
}

/// Fails every statement with a timeout
pub struct TimingOut;

impl QueryExecutor for TimingOut {
    fn execute(&self, _query: &CompiledQuery) -> Result<RowSet, ExecutionError> {
        Err(ExecutionError::timeout("deadline exceeded"))
    }
}
