//! Rows returned by an [`ArExecutor`](crate::ArExecutor).

use crate::executor::ArError;
use crate::value::TryGetable;
use sea_query::Value;

/// One result row: column names in select order, and their values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<Value>,
}

impl Row {
    pub fn new(columns: Vec<String>, values: Vec<Value>) -> Self {
        debug_assert_eq!(columns.len(), values.len());
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value at position `idx`.
    pub fn get(&self, idx: usize) -> Option<&Value> {
        self.values.get(idx)
    }

    /// Value of the first column named `name`. Qualified names (`users.name`)
    /// also match their bare column (`name`).
    pub fn get_by_name(&self, name: &str) -> Option<&Value> {
        self.columns
            .iter()
            .position(|c| c == name || unqualified(name) == c)
            .and_then(|idx| self.values.get(idx))
    }

    /// Decode the value at `idx` into `T`.
    ///
    /// # Errors
    ///
    /// Returns `ArError::ParseError` if the column is missing or the value does not
    /// decode into `T`.
    pub fn try_get<T: TryGetable>(&self, idx: usize) -> Result<T, ArError> {
        let value = self
            .values
            .get(idx)
            .cloned()
            .ok_or_else(|| ArError::ParseError(format!("no column at index {idx}")))?;
        T::try_get(value).map_err(|e| {
            let name = self.columns.get(idx).map_or("?", String::as_str);
            ArError::ParseError(format!("column {name}: {e}"))
        })
    }

    /// Decode the value of the column named `name` into `T`.
    ///
    /// # Errors
    ///
    /// Returns `ArError::ParseError` if there is no such column or the value does
    /// not decode into `T`.
    pub fn try_get_by_name<T: TryGetable>(&self, name: &str) -> Result<T, ArError> {
        let value = self
            .get_by_name(name)
            .cloned()
            .ok_or_else(|| ArError::ParseError(format!("no column named {name}")))?;
        T::try_get(value).map_err(|e| ArError::ParseError(format!("column {name}: {e}")))
    }

    /// Iterate `(column, value)` pairs in select order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(String::as_str).zip(self.values.iter())
    }

    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// `users.name` -> `name`
pub(crate) fn unqualified(column: &str) -> &str {
    column.rsplit_once('.').map_or(column, |(_, bare)| bare)
}
