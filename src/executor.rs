//! `ArExecutor` Module
//!
//! Provides the `ArExecutor` trait that abstracts statement execution, and the
//! `SqliteExecutor` implementation over `rusqlite`.
//!
//! Every query builder terminal and every record lifecycle operation takes an
//! executor by reference, so an application (or a test) can swap in any
//! implementation: a plain connection, a wrapper that counts statements, a fake.

use crate::config::DatabaseConfig;
use crate::row::Row;
use crate::value::inspect::variant_name;
use rusqlite::types::{Value as SqlValue, ValueRef};
use rusqlite::{params_from_iter, Connection};
use sea_query::Value;
use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

#[cfg(feature = "tracing")]
use crate::metrics::tracing_helpers;
#[cfg(feature = "metrics")]
use crate::metrics::METRICS;

/// `ArExecutor` error type
#[derive(Debug)]
pub enum ArError {
    /// SQLite error from `rusqlite`
    Sqlite(rusqlite::Error),
    /// Query execution error
    QueryError(String),
    /// Row parsing/conversion error
    ParseError(String),
    /// Other execution errors
    Other(String),
}

impl fmt::Display for ArError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArError::Sqlite(e) => {
                write!(f, "SQLite error: {e}")
            }
            ArError::QueryError(s) => {
                write!(f, "Query error: {s}")
            }
            ArError::ParseError(s) => {
                write!(f, "Parse error: {s}")
            }
            ArError::Other(s) => {
                write!(f, "Execution error: {s}")
            }
        }
    }
}

impl std::error::Error for ArError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ArError::Sqlite(e) => Some(e),
            _ => None,
        }
    }
}

impl From<rusqlite::Error> for ArError {
    fn from(err: rusqlite::Error) -> Self {
        ArError::Sqlite(err)
    }
}

/// Outcome of a statement that does not return rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExecResult {
    /// Rows inserted, updated or deleted by the statement.
    pub rows_affected: u64,
    /// Row id generated by the most recent successful INSERT on the connection.
    pub last_insert_id: Option<i64>,
}

/// Trait for executing database operations
///
/// Placeholders are positional `?`; `params` bind to them left to right.
///
/// # Examples
///
/// ```rust
/// use activerow::{ArError, ArExecutor, SqliteExecutor, Value};
///
/// # fn main() -> Result<(), ArError> {
/// let executor = SqliteExecutor::open_in_memory()?;
/// executor.execute_batch("CREATE TABLE users (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT)")?;
///
/// let result = executor.execute(
///     "INSERT INTO users (name) VALUES (?)",
///     &[Value::String(Some("alice".to_string()))],
/// )?;
/// assert_eq!(result.rows_affected, 1);
///
/// let row = executor.query_one("SELECT COUNT(*) FROM users", &[])?;
/// let count: i64 = row.expect("one row").try_get(0)?;
/// assert_eq!(count, 1);
/// # Ok(())
/// # }
/// ```
pub trait ArExecutor {
    /// Execute a statement that does not return rows
    ///
    /// # Errors
    ///
    /// Returns `ArError` if preparing, binding or running the statement fails.
    fn execute(&self, sql: &str, params: &[Value]) -> Result<ExecResult, ArError>;

    /// Execute a query and return its first row
    ///
    /// A query that matches nothing is `Ok(None)`, never an error.
    ///
    /// # Errors
    ///
    /// Returns `ArError` if the query execution fails.
    fn query_one(&self, sql: &str, params: &[Value]) -> Result<Option<Row>, ArError>;

    /// Execute a query and return all rows
    ///
    /// # Errors
    ///
    /// Returns `ArError` if the query execution fails.
    fn query_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, ArError>;
}

impl<E: ArExecutor + ?Sized> ArExecutor for &E {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<ExecResult, ArError> {
        (**self).execute(sql, params)
    }

    fn query_one(&self, sql: &str, params: &[Value]) -> Result<Option<Row>, ArError> {
        (**self).query_one(sql, params)
    }

    fn query_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, ArError> {
        (**self).query_all(sql, params)
    }
}

/// Implementation of `ArExecutor` for a `rusqlite::Connection`
pub struct SqliteExecutor {
    conn: Connection,
    log_queries: bool,
}

impl SqliteExecutor {
    /// Create an executor from an already opened connection
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            log_queries: false,
        }
    }

    /// Open (or create) a database file
    ///
    /// # Errors
    ///
    /// Returns `ArError::Sqlite` if the file cannot be opened.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ArError> {
        Ok(Self::new(Connection::open(path)?))
    }

    /// Open a private in-memory database
    ///
    /// # Errors
    ///
    /// Returns `ArError::Sqlite` if SQLite cannot allocate the database.
    pub fn open_in_memory() -> Result<Self, ArError> {
        Ok(Self::new(Connection::open_in_memory()?))
    }

    /// Open the database described by `config`, applying its busy timeout and log mode
    ///
    /// # Errors
    ///
    /// Returns `ArError` if the path is rejected or the database cannot be opened.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self, ArError> {
        let mut executor = crate::connection::connect(&config.path)?;
        executor
            .conn
            .busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        executor.set_log_queries(config.log_queries);
        Ok(executor)
    }

    /// Run one or more `;`-separated statements without parameters (schema bootstrap)
    ///
    /// # Errors
    ///
    /// Returns `ArError::Sqlite` on the first failing statement.
    pub fn execute_batch(&self, sql: &str) -> Result<(), ArError> {
        self.instrument(sql, 0, || self.conn.execute_batch(sql).map_err(ArError::from))
    }

    /// Log every statement at `info` instead of `trace`
    pub fn set_log_queries(&mut self, enabled: bool) {
        self.log_queries = enabled;
    }

    /// Whether statements are logged at `info`
    pub fn log_queries(&self) -> bool {
        self.log_queries
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consume the executor and return the underlying connection
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    fn instrument<T>(
        &self,
        sql: &str,
        arg_count: usize,
        run: impl FnOnce() -> Result<T, ArError>,
    ) -> Result<T, ArError> {
        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::execute_query_span(sql).entered();

        if self.log_queries {
            log::info!("{sql} ({arg_count} args)");
        } else {
            log::trace!("{sql} ({arg_count} args)");
        }

        let start = Instant::now();
        let result = run();
        let elapsed = start.elapsed();

        #[cfg(feature = "metrics")]
        METRICS.record_query(elapsed);

        if let Err(ref err) = result {
            #[cfg(feature = "metrics")]
            METRICS.record_query_error();
            log::debug!("statement failed after {elapsed:?}: {err}");
        }
        result
    }
}

impl fmt::Debug for SqliteExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteExecutor")
            .field("path", &self.conn.path())
            .field("log_queries", &self.log_queries)
            .finish()
    }
}

impl ArExecutor for SqliteExecutor {
    fn execute(&self, sql: &str, params: &[Value]) -> Result<ExecResult, ArError> {
        self.instrument(sql, params.len(), || {
            let bound = to_sql_values(params)?;
            let mut stmt = self.conn.prepare_cached(sql)?;
            let affected = stmt.execute(params_from_iter(bound))?;
            // last_insert_rowid is connection-wide; only trust it when this statement wrote
            let id = self.conn.last_insert_rowid();
            Ok(ExecResult {
                rows_affected: affected as u64,
                last_insert_id: (affected > 0 && id != 0).then_some(id),
            })
        })
    }

    fn query_one(&self, sql: &str, params: &[Value]) -> Result<Option<Row>, ArError> {
        self.instrument(sql, params.len(), || {
            let bound = to_sql_values(params)?;
            let mut stmt = self.conn.prepare_cached(sql)?;
            let columns = column_names(&stmt);
            let mut rows = stmt.query(params_from_iter(bound))?;
            match rows.next()? {
                Some(row) => Ok(Some(read_row(&columns, row)?)),
                None => Ok(None),
            }
        })
    }

    fn query_all(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, ArError> {
        self.instrument(sql, params.len(), || {
            let bound = to_sql_values(params)?;
            let mut stmt = self.conn.prepare_cached(sql)?;
            let columns = column_names(&stmt);
            let mut rows = stmt.query(params_from_iter(bound))?;
            let mut out = Vec::new();
            while let Some(row) = rows.next()? {
                out.push(read_row(&columns, row)?);
            }
            Ok(out)
        })
    }
}

fn column_names(stmt: &rusqlite::Statement<'_>) -> Vec<String> {
    stmt.column_names().into_iter().map(str::to_string).collect()
}

fn read_row(columns: &[String], row: &rusqlite::Row<'_>) -> Result<Row, ArError> {
    let mut values = Vec::with_capacity(columns.len());
    for idx in 0..columns.len() {
        values.push(from_value_ref(row.get_ref(idx)?));
    }
    Ok(Row::new(columns.to_vec(), values))
}

fn to_sql_values(params: &[Value]) -> Result<Vec<SqlValue>, ArError> {
    params.iter().map(to_sql_value).collect()
}

/// Convert a bind value into SQLite's storage classes.
pub(crate) fn to_sql_value(value: &Value) -> Result<SqlValue, ArError> {
    let converted = match value {
        Value::Bool(Some(b)) => SqlValue::Integer(i64::from(*b)),
        Value::TinyInt(Some(v)) => SqlValue::Integer(i64::from(*v)),
        Value::SmallInt(Some(v)) => SqlValue::Integer(i64::from(*v)),
        Value::Int(Some(v)) => SqlValue::Integer(i64::from(*v)),
        Value::BigInt(Some(v)) => SqlValue::Integer(*v),
        Value::TinyUnsigned(Some(v)) => SqlValue::Integer(i64::from(*v)),
        Value::SmallUnsigned(Some(v)) => SqlValue::Integer(i64::from(*v)),
        Value::Unsigned(Some(v)) => SqlValue::Integer(i64::from(*v)),
        Value::BigUnsigned(Some(v)) => SqlValue::Integer(i64::try_from(*v).map_err(|_| {
            ArError::Other(format!("{v} does not fit in a SQLite integer"))
        })?),
        Value::Float(Some(v)) => SqlValue::Real(f64::from(*v)),
        Value::Double(Some(v)) => SqlValue::Real(*v),
        Value::String(Some(s)) => SqlValue::Text(s.clone()),
        Value::Char(Some(c)) => SqlValue::Text(c.to_string()),
        Value::Bytes(Some(b)) => SqlValue::Blob(b.clone()),
        Value::Json(Some(j)) => SqlValue::Text(j.to_string()),
        other if crate::value::inspect::is_null(other) => SqlValue::Null,
        other => {
            return Err(ArError::Other(format!(
                "unsupported bind value type: {}",
                variant_name(other)
            )))
        }
    };
    Ok(converted)
}

/// Convert a column read back from SQLite into a `Value`.
///
/// NULL columns carry no type, so they come back as `Value::String(None)`;
/// decoding treats every `None` variant alike.
pub(crate) fn from_value_ref(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null => Value::String(None),
        ValueRef::Integer(v) => Value::BigInt(Some(v)),
        ValueRef::Real(v) => Value::Double(Some(v)),
        ValueRef::Text(t) => Value::String(Some(String::from_utf8_lossy(t).into_owned())),
        ValueRef::Blob(b) => Value::Bytes(Some(b.to_vec())),
    }
}
