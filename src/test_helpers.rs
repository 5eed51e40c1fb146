//! Helpers for tests that run against a real SQLite database.
//!
//! Compiled for this crate's own tests, and for downstream tests through the
//! `test-helpers` feature.

use crate::executor::{ArError, ArExecutor, ExecResult, SqliteExecutor};
use crate::row::Row;
use sea_query::Value;
use std::cell::Cell;
use std::ops::Deref;

/// In-memory database with a schema applied
///
/// Dereferences to its [`SqliteExecutor`], so `&*db` can be handed to any
/// finder or lifecycle method.
#[derive(Debug)]
pub struct TestDatabase {
    executor: SqliteExecutor,
}

impl TestDatabase {
    /// Empty in-memory database
    ///
    /// # Errors
    ///
    /// Returns `ArError::Sqlite` if the database cannot be opened.
    pub fn new() -> Result<Self, ArError> {
        Ok(Self {
            executor: SqliteExecutor::open_in_memory()?,
        })
    }

    /// In-memory database with `schema` (one or more `;`-separated statements) applied
    ///
    /// # Errors
    ///
    /// Returns `ArError::Sqlite` if the schema fails to apply.
    pub fn with_schema(schema: &str) -> Result<Self, ArError> {
        let db = Self::new()?;
        db.executor.execute_batch(schema)?;
        Ok(db)
    }

    pub fn executor(&self) -> &SqliteExecutor {
        &self.executor
    }
}

impl Deref for TestDatabase {
    type Target = SqliteExecutor;

    fn deref(&self) -> &SqliteExecutor {
        &self.executor
    }
}

pub fn create_temp_table<E: ArExecutor + ?Sized>(executor: &E, name: &str, schema: &str) -> Result<(), ArError> {
    let sql = format!("CREATE TEMP TABLE IF NOT EXISTS {name} {schema}");
    executor.execute(&sql, &[])?;
    Ok(())
}

pub fn drop_temp_table<E: ArExecutor + ?Sized>(executor: &E, name: &str) -> Result<(), ArError> {
    let sql = format!("DROP TABLE IF EXISTS {name}");
    executor.execute(&sql, &[])?;
    Ok(())
}

/// Executor wrapper that counts every statement sent to the database
///
/// Used to prove that rejected operations perform no I/O.
#[derive(Debug)]
pub struct CountingExecutor<E> {
    inner: E,
    statements: Cell<usize>,
}

impl<E: ArExecutor> CountingExecutor<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            statements: Cell::new(0),
        }
    }

    /// Statements executed so far
    pub fn count(&self) -> usize {
        self.statements.get()
    }

    pub fn reset(&self) {
        self.statements.set(0);
    }

    fn tick(&self) {
        self.statements.set(self.statements.get() + 1);
    }
}

impl<E: ArExecutor> ArExecutor for CountingExecutor<E> {
    fn execute(&self, sql: &str, args: &[Value]) -> Result<ExecResult, ArError> {
        self.tick();
        self.inner.execute(sql, args)
    }

    fn query_one(&self, sql: &str, args: &[Value]) -> Result<Option<Row>, ArError> {
        self.tick();
        self.inner.query_one(sql, args)
    }

    fn query_all(&self, sql: &str, args: &[Value]) -> Result<Vec<Row>, ArError> {
        self.tick();
        self.inner.query_all(sql, args)
    }
}
