//! Query building and execution.
//!
//! # Architecture
//!
//! - **Condition**: predicate fragments with placeholder completion (`condition`)
//! - **Relation**: untyped SELECT builder with fixed clause order (`relation`)
//! - **Statement**: INSERT / UPDATE / DELETE builders (`statement`)
//! - **Select**: typed wrapper over `Relation` for a [`Record`](crate::Record) (`select`)
//! - **Execution**: terminal operations on `Select` (`all`, `one`, `first`, `count`, …)
//!
//! Every builder renders to `(String, Vec<Value>)` with `?` placeholders; the
//! Nth placeholder always binds the Nth value.

pub mod condition;
#[doc(inline)]
pub use condition::{Condition, Connector};

pub mod relation;
#[doc(inline)]
pub use relation::{Join, JoinKind, Order, Relation};

pub mod statement;
#[doc(inline)]
pub use statement::{DeleteStatement, InsertStatement, StatementParams, UpdateStatement};

// SELECT query builder
pub mod select;
#[doc(inline)]
pub use select::Select;

// Query execution methods
pub mod execution;
