//! Column assignments for `create`, `update` and friends.

use crate::value::ValueType;
use sea_query::Value;

/// Ordered column → value assignments
///
/// Setting a column twice keeps its first position and the last value.
///
/// ```rust
/// use activerow::{Params, Value};
///
/// let params = Params::new().set("name", "alice").set("age", 30).set("name", "bob");
/// assert_eq!(params.len(), 2);
/// assert_eq!(params.get("name"), Some(&Value::String(Some("bob".into()))));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<V: ValueType>(mut self, column: &str, value: V) -> Self {
        self.insert(column, value.into_value());
        self
    }

    pub fn insert(&mut self, column: &str, value: Value) {
        match self.entries.iter_mut().find(|(c, _)| c == column) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((column.to_string(), value)),
        }
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.entries.iter().find(|(c, _)| c == column).map(|(_, v)| v)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.get(column).is_some()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(c, v)| (c.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: AsRef<str>> FromIterator<(K, Value)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (column, value) in iter {
            params.insert(column.as_ref(), value);
        }
        params
    }
}

impl IntoIterator for Params {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
