//! Single-table mutation statements.
//!
//! Parameters are kept in a `BTreeMap`, so column lists always render in
//! lexical order and identical parameter sets produce byte-identical SQL.

use crate::query::condition::{render_conditions, Condition, Connector};
use crate::value::IntoArgs;
use sea_query::Value;
use std::collections::BTreeMap;

/// Column → value assignments of an INSERT or UPDATE
pub type StatementParams = BTreeMap<String, Value>;

fn collect_params<I, K>(params: I) -> StatementParams
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    params.into_iter().map(|(k, v)| (k.into(), v)).collect()
}

/// `INSERT INTO table (…) VALUES (…)`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsertStatement {
    table: String,
    params: StatementParams,
}

impl InsertStatement {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            params: StatementParams::new(),
        }
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Merge assignments; a repeated column keeps the last value
    pub fn params<I, K>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.params.extend(collect_params(params));
        self
    }

    pub fn build(&self) -> (String, Vec<Value>) {
        if self.params.is_empty() {
            return (format!("INSERT INTO {} DEFAULT VALUES", self.table), Vec::new());
        }
        let columns: Vec<&str> = self.params.keys().map(String::as_str).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.table,
            columns.join(", "),
            crate::query::condition::placeholders(columns.len())
        );
        (sql, self.params.values().cloned().collect())
    }
}

/// `UPDATE table SET … [WHERE …]`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateStatement {
    table: String,
    params: StatementParams,
    wheres: Vec<Condition>,
}

impl UpdateStatement {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Merge assignments; a repeated column keeps the last value
    pub fn params<I, K>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        self.params.extend(collect_params(params));
        self
    }

    pub fn filter(mut self, cond: &str, args: impl IntoArgs) -> Self {
        self.wheres.push(Condition::new(Connector::And, cond, args.into_args()));
        self
    }

    pub fn and(self, cond: &str, args: impl IntoArgs) -> Self {
        self.filter(cond, args)
    }

    pub fn or(mut self, cond: &str, args: impl IntoArgs) -> Self {
        self.wheres.push(Condition::new(Connector::Or, cond, args.into_args()));
        self
    }

    /// Render the statement. SET values bind before WHERE values.
    pub fn build(&self) -> (String, Vec<Value>) {
        let sets: Vec<String> = self.params.keys().map(|k| format!("{k} = ?")).collect();
        let mut sql = format!("UPDATE {} SET {}", self.table, sets.join(", "));
        let mut args: Vec<Value> = self.params.values().cloned().collect();
        render_conditions("WHERE", &self.wheres, &mut sql, &mut args);
        (sql, args)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// `DELETE FROM table [WHERE …]`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteStatement {
    table: String,
    wheres: Vec<Condition>,
}

impl DeleteStatement {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            wheres: Vec::new(),
        }
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn filter(mut self, cond: &str, args: impl IntoArgs) -> Self {
        self.wheres.push(Condition::new(Connector::And, cond, args.into_args()));
        self
    }

    pub fn and(self, cond: &str, args: impl IntoArgs) -> Self {
        self.filter(cond, args)
    }

    pub fn or(mut self, cond: &str, args: impl IntoArgs) -> Self {
        self.wheres.push(Condition::new(Connector::Or, cond, args.into_args()));
        self
    }

    /// Reuse predicates already rendered by a relation
    pub fn conditions(mut self, conditions: &[Condition]) -> Self {
        self.wheres.extend(conditions.iter().cloned());
        self
    }

    pub fn build(&self) -> (String, Vec<Value>) {
        let mut sql = format!("DELETE FROM {}", self.table);
        let mut args = Vec::new();
        render_conditions("WHERE", &self.wheres, &mut sql, &mut args);
        (sql, args)
    }
}
