//! # ActiveRow
//!
//! Chainable relation query builder and validated record persistence over SQLite.
//!
//! - [`Select`] / [`Relation`] build `SELECT` statements clause by clause and
//!   render them with `?` placeholders in a fixed clause order
//! - [`Record`] is the per-type field registry; [`ActiveRecord`] layers finders,
//!   validation, persistence and associations on top of it
//! - [`ArExecutor`] is the single seam to the database, implemented by
//!   [`SqliteExecutor`]
//!
//! ```ignore
//! use activerow::{ActiveRecord, Order, SqliteExecutor};
//!
//! let db = SqliteExecutor::open("app.db")?;
//! let adults = User::query()
//!     .filter("age >=", 18)
//!     .order_by("name", Order::Asc)
//!     .limit(10)
//!     .all(&db)?;
//! ```

pub mod active_model;
pub mod config;
pub mod connection;
pub mod executor;
pub mod metrics;
pub mod model;
pub mod query;
pub mod raw_sql;
pub mod relation;
pub mod row;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod validation;
pub mod value;

#[cfg(test)]
mod tests_cfg;

pub use active_model::{ActiveRecord, Params};
pub use config::DatabaseConfig;
pub use connection::{check_connection_health, connect, ConnectionError};
pub use executor::{ArError, ArExecutor, ExecResult, SqliteExecutor};
pub use model::{decode, ModelError, PrimaryKey, Record};
pub use query::{
    Condition, Connector, DeleteStatement, InsertStatement, JoinKind, Order, Relation, Select,
    UpdateStatement,
};
pub use raw_sql::{execute_statement, execute_unprepared, find_all_by_statement, find_by_statement, query_value};
pub use relation::{Related, RelationDef, RelationType};
pub use row::Row;
pub use validation::{Errors, Numericality, On, Rule, Validator};
pub use value::{IntoArgs, TryGetable, ValueExtractionError, ValueType};

pub use sea_query::Value;
