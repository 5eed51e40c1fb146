//! Connection Module
//!
//! Opens SQLite databases and checks that an executor is usable.
//!
//! This module provides:
//! - Database path validation
//! - Connection establishment (file or `:memory:`)
//! - A `SELECT 1` health check that works against any [`ArExecutor`]

use crate::executor::{ArError, ArExecutor, SqliteExecutor};
use rusqlite::Connection;
use std::fmt;
use std::path::Path;

/// Connection error type
#[derive(Debug)]
pub enum ConnectionError {
    /// The database path is unusable
    InvalidPath(String),
    /// SQLite refused to open the database
    Sqlite(rusqlite::Error),
}

impl fmt::Display for ConnectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionError::InvalidPath(s) => {
                write!(f, "Invalid database path: {s}")
            }
            ConnectionError::Sqlite(e) => {
                write!(f, "SQLite error: {e}")
            }
        }
    }
}

impl std::error::Error for ConnectionError {}

impl From<rusqlite::Error> for ConnectionError {
    fn from(err: rusqlite::Error) -> Self {
        ConnectionError::Sqlite(err)
    }
}

impl From<ConnectionError> for ArError {
    fn from(err: ConnectionError) -> Self {
        match err {
            ConnectionError::Sqlite(e) => ArError::Sqlite(e),
            other => ArError::Other(other.to_string()),
        }
    }
}

/// Opens a SQLite database and wraps it in an executor
///
/// # Arguments
///
/// * `path` - Database file path, or `:memory:` for a private in-memory database
///
/// # Errors
///
/// Returns `ConnectionError::InvalidPath` if the path is rejected by
/// [`validate_database_path`], or `ConnectionError::Sqlite` if SQLite cannot
/// open it.
///
/// # Examples
///
/// ```rust
/// use activerow::connection::connect;
///
/// let executor = connect(":memory:")?;
/// # Ok::<(), activerow::connection::ConnectionError>(())
/// ```
pub fn connect(path: &str) -> Result<SqliteExecutor, ConnectionError> {
    validate_database_path(path)?;

    let conn = if path == ":memory:" {
        Connection::open_in_memory()?
    } else {
        Connection::open(path)?
    };
    log::debug!("opened database {path}");

    Ok(SqliteExecutor::new(conn))
}

/// Validates a database path
///
/// Accepts `:memory:` and any non-empty path whose parent directory exists.
///
/// # Errors
///
/// Returns `ConnectionError::InvalidPath` describing the problem.
pub fn validate_database_path(path: &str) -> Result<(), ConnectionError> {
    if path.trim().is_empty() {
        return Err(ConnectionError::InvalidPath(
            "Database path cannot be empty".to_string(),
        ));
    }
    if path == ":memory:" {
        return Ok(());
    }

    let file = Path::new(path);
    if file.is_dir() {
        return Err(ConnectionError::InvalidPath(format!("{path} is a directory")));
    }
    match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => Err(
            ConnectionError::InvalidPath(format!("directory {} does not exist", parent.display())),
        ),
        _ => Ok(()),
    }
}

/// Runs `SELECT 1` through the executor
///
/// Returns `Ok(true)` when the database answers with 1.
///
/// # Errors
///
/// Returns `ArError` if the query itself fails.
pub fn check_connection_health<E: ArExecutor + ?Sized>(executor: &E) -> Result<bool, ArError> {
    let row = executor.query_one("SELECT 1", &[])?;
    Ok(matches!(row.map(|r| r.try_get::<i64>(0)), Some(Ok(1))))
}
