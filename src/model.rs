//! Record trait: the per-type field registry
//!
//! A [`Record`] names its table and its ordered column set, and exposes every
//! column through `get`/`set` by name. Row mapping, statement building,
//! validation and associations all work through this registry, so no runtime
//! reflection is needed and every field access stays type checked inside the
//! implementing type.
//!
//! # Example
//!
//! ```rust
//! use activerow::{decode, ModelError, Record, Value, ValueType};
//!
//! #[derive(Debug, Clone, Default)]
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl Record for User {
//!     type PrimaryKey = i64;
//!
//!     fn table_name() -> &'static str { "users" }
//!     fn columns() -> &'static [&'static str] { &["id", "name"] }
//!     fn primary_key(&self) -> i64 { self.id }
//!     fn set_primary_key(&mut self, id: i64) { self.id = id; }
//!
//!     fn get(&self, column: &str) -> Option<Value> {
//!         match column {
//!             "id" => Some(self.id.into_value()),
//!             "name" => Some(self.name.clone().into_value()),
//!             _ => None,
//!         }
//!     }
//!
//!     fn set(&mut self, column: &str, value: Value) -> Result<(), ModelError> {
//!         match column {
//!             "id" => self.id = decode(column, value)?,
//!             "name" => self.name = decode(column, value)?,
//!             _ => return Err(ModelError::ColumnNotFound(column.to_string())),
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut user = User::default();
//! user.set("name", Value::String(Some("alice".into()))).unwrap();
//! assert_eq!(user.get("name"), Some(Value::String(Some("alice".into()))));
//! ```

use crate::validation::{Errors, Rule};
use crate::value::{TryGetable, ValueExtractionError, ValueType};
use sea_query::Value;
use std::fmt;

/// Primary key types. The type's zero value marks a record that has never
/// been inserted.
pub trait PrimaryKey: Copy + PartialEq + Default + fmt::Debug + fmt::Display + TryGetable {
    fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Convert the row id reported by the database after an INSERT.
    ///
    /// # Errors
    ///
    /// Returns `ValueExtractionError::ConversionError` if the id does not fit.
    fn from_insert_id(id: i64) -> Result<Self, ValueExtractionError> {
        Self::try_get(Value::BigInt(Some(id)))
    }
}

impl PrimaryKey for i32 {}
impl PrimaryKey for i64 {}
impl PrimaryKey for u32 {}
impl PrimaryKey for u64 {}

/// Error raised by a record's field registry
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The record has no column with this name
    ColumnNotFound(String),
    /// The value could not be decoded into the column's field type
    InvalidValue {
        column: String,
        source: ValueExtractionError,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::ColumnNotFound(column) => write!(f, "unknown column {column}"),
            ModelError::InvalidValue { column, source } => {
                write!(f, "invalid value for {column}: {source}")
            }
        }
    }
}

impl std::error::Error for ModelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ModelError::InvalidValue { source, .. } => Some(source),
            ModelError::ColumnNotFound(_) => None,
        }
    }
}

/// Decode `value` for `column`, for use inside [`Record::set`].
///
/// # Errors
///
/// Returns `ModelError::InvalidValue` naming the column.
pub fn decode<T: TryGetable>(column: &str, value: Value) -> Result<T, ModelError> {
    T::try_get(value).map_err(|source| ModelError::InvalidValue {
        column: column.to_string(),
        source,
    })
}

/// Trait for application record types
///
/// `Default` builds a new record (zero primary key). The column list is the
/// full selected column set, in the order rows are read and statements are
/// rendered.
pub trait Record: Default + Clone + fmt::Debug {
    type PrimaryKey: PrimaryKey;

    /// Backing table
    fn table_name() -> &'static str;

    /// Primary key column, `id` unless overridden
    fn primary_key_column() -> &'static str {
        "id"
    }

    /// Every column, primary key included
    fn columns() -> &'static [&'static str];

    fn primary_key(&self) -> Self::PrimaryKey;

    fn set_primary_key(&mut self, id: Self::PrimaryKey);

    /// Current value of `column`, `None` for an unknown column
    fn get(&self, column: &str) -> Option<Value>;

    /// Assign `value` to `column`
    ///
    /// # Errors
    ///
    /// Returns `ModelError` for an unknown column or an undecodable value.
    fn set(&mut self, column: &str, value: Value) -> Result<(), ModelError>;

    /// Declared validation rules, evaluated in order
    fn rules() -> Vec<(&'static str, Rule)> {
        Vec::new()
    }

    /// Custom validation run after the declared rules
    fn validate_custom(&self, _errors: &mut Errors) {}

    /// `(column, value)` for every column except the primary key
    fn data_values(&self) -> Vec<(&'static str, Value)> {
        let pk = Self::primary_key_column();
        Self::columns()
            .iter()
            .filter(|c| **c != pk)
            .filter_map(|c| self.get(c).map(|v| (*c, v)))
            .collect()
    }

    /// Primary key as a bind value
    fn primary_key_value(&self) -> Value {
        self.primary_key().into_value()
    }
}
