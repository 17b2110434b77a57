//! SQLite query executor

use crate::config::SqliteConfig;
use crate::executor::{QueryExecutor, RowSet, SubjectRow};
use parking_lot::Mutex;
use rusqlite::types::Value;
use rusqlite::{Connection, ErrorCode, ToSql};
use rust_decimal::prelude::ToPrimitive;
use std::path::Path;
use std::time::{Duration, Instant};
use subject_criteria_diagnostics::ExecutionError;
use subject_criteria_sql::{CompiledQuery, SqlValue};
use tracing::{debug, info};

/// Virtual machine instructions between deadline checks
const PROGRESS_INTERVAL: i32 = 1_000;

/// Executes compiled statements on a single SQLite connection
pub struct SqliteExecutor {
    conn: Mutex<Connection>,
    query_timeout: Option<Duration>,
}

impl SqliteExecutor {
    /// Open a database file
    pub fn open(path: impl AsRef<Path>, config: &SqliteConfig) -> Result<Self, ExecutionError> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(map_error)?;
        let executor = Self::from_connection(conn, config)?;
        info!("Opened database at {:?}", path);
        Ok(executor)
    }

    /// Open a private in-memory database (for testing)
    pub fn open_in_memory(config: &SqliteConfig) -> Result<Self, ExecutionError> {
        let conn = Connection::open_in_memory().map_err(map_error)?;
        Self::from_connection(conn, config)
    }

    pub fn from_connection(conn: Connection, config: &SqliteConfig) -> Result<Self, ExecutionError> {
        conn.busy_timeout(config.busy_timeout()).map_err(map_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
            query_timeout: config.query_timeout(),
        })
    }

    /// Run a closure against the underlying connection, e.g. to seed a schema
    pub fn with_connection<R>(
        &self,
        f: impl FnOnce(&Connection) -> rusqlite::Result<R>,
    ) -> Result<R, ExecutionError> {
        let conn = self.conn.lock();
        f(&conn).map_err(map_error)
    }

    fn run(conn: &Connection, query: &CompiledQuery) -> rusqlite::Result<RowSet> {
        let values: Vec<(String, Value)> = query
            .binds
            .iter()
            .map(|(name, value)| (format!(":{}", name), to_sqlite(value)))
            .collect();
        let params: Vec<(&str, &dyn ToSql)> = values
            .iter()
            .map(|(name, value)| (name.as_str(), value as &dyn ToSql))
            .collect();

        let mut stmt = conn.prepare(&query.sql)?;
        let rows = stmt.query_map(params.as_slice(), |row| {
            Ok(SubjectRow {
                screening_subject_id: row.get(0)?,
                nhs_number: row.get(1)?,
            })
        })?;
        rows.collect()
    }
}

impl QueryExecutor for SqliteExecutor {
    fn execute(&self, query: &CompiledQuery) -> Result<RowSet, ExecutionError> {
        let conn = self.conn.lock();

        if let Some(timeout) = self.query_timeout {
            let deadline = Instant::now() + timeout;
            conn.progress_handler(PROGRESS_INTERVAL, Some(move || Instant::now() >= deadline));
        }
        let started = Instant::now();
        let result = Self::run(&conn, query);
        if self.query_timeout.is_some() {
            conn.progress_handler(PROGRESS_INTERVAL, None::<fn() -> bool>);
        }

        let rows = result.map_err(map_error)?;
        debug!(
            rows = rows.len(),
            elapsed_ms = elapsed_ms(started.elapsed()),
            "statement executed"
        );
        Ok(rows)
    }
}

/// Whole milliseconds, saturating at `u64::MAX`
fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}

fn to_sqlite(value: &SqlValue) -> Value {
    match value {
        SqlValue::Null => Value::Null,
        SqlValue::Integer(n) => Value::Integer(*n),
        SqlValue::Decimal(d) => match (d.fract().is_zero(), d.to_i64(), d.to_f64()) {
            (true, Some(n), _) => Value::Integer(n),
            (_, _, Some(f)) => Value::Real(f),
            _ => Value::Text(d.to_string()),
        },
        SqlValue::Text(s) => Value::Text(s.clone()),
        SqlValue::Date(d) => Value::Text(d.format("%Y-%m-%d").to_string()),
    }
}

/// Busy, locked and interrupted statements count as timeouts
fn map_error(err: rusqlite::Error) -> ExecutionError {
    match err.sqlite_error_code() {
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked | ErrorCode::OperationInterrupted) => {
            ExecutionError::timeout(err.to_string())
        }
        Some(ErrorCode::CannotOpen | ErrorCode::NotADatabase | ErrorCode::PermissionDenied) => {
            ExecutionError::connectivity(err.to_string())
        }
        _ => ExecutionError::statement(err.to_string()),
    }
}
