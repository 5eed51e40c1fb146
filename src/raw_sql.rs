//! Raw SQL Helpers
//!
//! Convenience functions for running hand-written SQL through an [`ArExecutor`]
//! when the query builders do not cover a statement.

use crate::executor::{ArError, ArExecutor, ExecResult};
use crate::row::Row;
use crate::value::TryGetable;
use sea_query::Value;

/// Execute an unprepared SQL statement
///
/// Executes a raw SQL string without parameter binding.
///
/// # Errors
///
/// Returns `ArError` if the SQL execution fails.
///
/// # Examples
///
/// ```rust
/// use activerow::{execute_unprepared, ArError, SqliteExecutor};
///
/// # fn main() -> Result<(), ArError> {
/// let executor = SqliteExecutor::open_in_memory()?;
/// execute_unprepared(&executor, "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)")?;
/// # Ok(())
/// # }
/// ```
pub fn execute_unprepared<E: ArExecutor + ?Sized>(executor: &E, sql: &str) -> Result<ExecResult, ArError> {
    executor.execute(sql, &[])
}

/// Execute a prepared statement with parameters
///
/// # Arguments
///
/// * `executor` - The executor to use for database operations
/// * `sql` - SQL string with `?` placeholders
/// * `params` - Values bound to the placeholders, left to right
///
/// # Errors
///
/// Returns `ArError` if the SQL execution fails.
pub fn execute_statement<E: ArExecutor + ?Sized>(
    executor: &E,
    sql: &str,
    params: &[Value],
) -> Result<ExecResult, ArError> {
    executor.execute(sql, params)
}

/// Query the first row of a raw SQL statement
///
/// Returns `Ok(None)` when nothing matches.
///
/// # Errors
///
/// Returns `ArError` if the query execution fails.
pub fn find_by_statement<E: ArExecutor + ?Sized>(
    executor: &E,
    sql: &str,
    params: &[Value],
) -> Result<Option<Row>, ArError> {
    executor.query_one(sql, params)
}

/// Query every row of a raw SQL statement
///
/// # Errors
///
/// Returns `ArError` if the query execution fails.
///
/// # Examples
///
/// ```rust
/// use activerow::{execute_unprepared, find_all_by_statement, ArError, SqliteExecutor, Value};
///
/// # fn main() -> Result<(), ArError> {
/// let executor = SqliteExecutor::open_in_memory()?;
/// execute_unprepared(&executor, "CREATE TABLE users (id INTEGER PRIMARY KEY, name TEXT)")?;
/// execute_unprepared(&executor, "INSERT INTO users (name) VALUES ('a'), ('b')")?;
///
/// let rows = find_all_by_statement(
///     &executor,
///     "SELECT id, name FROM users WHERE name != ?",
///     &[Value::String(Some("a".to_string()))],
/// )?;
/// assert_eq!(rows.len(), 1);
/// # Ok(())
/// # }
/// ```
pub fn find_all_by_statement<E: ArExecutor + ?Sized>(
    executor: &E,
    sql: &str,
    params: &[Value],
) -> Result<Vec<Row>, ArError> {
    executor.query_all(sql, params)
}

/// Query a single value: the first column of the first row
///
/// # Errors
///
/// Returns `ArError::QueryError` if no row is returned, or
/// `ArError::ParseError` if the value does not decode into `T`.
pub fn query_value<T: TryGetable, E: ArExecutor + ?Sized>(
    executor: &E,
    sql: &str,
    params: &[Value],
) -> Result<T, ArError> {
    let row = executor
        .query_one(sql, params)?
        .ok_or_else(|| ArError::QueryError(format!("no rows returned by: {sql}")))?;
    row.try_get(0)
}
