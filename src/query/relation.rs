//! Untyped read-query builder.
//!
//! A [`Relation`] accumulates the clauses of one SELECT against one base table
//! and renders them, in a fixed clause order, into SQL with positional `?`
//! placeholders plus the matching value list:
//!
//! `EXPLAIN` → `SELECT` → `FROM` → `JOIN`s → `WHERE` → `GROUP BY` → `HAVING`
//! → `ORDER BY` → `LIMIT ?` → `OFFSET ?`
//!
//! Within every clause, items render in the order they were added, and bind
//! values follow the same order, so the Nth `?` always binds the Nth value.
//!
//! ```rust
//! use activerow::{Order, Relation, Value};
//!
//! let (sql, args) = Relation::new("users")
//!     .columns(["id", "name"])
//!     .filter("age >", 18)
//!     .order_by("name", Order::Asc)
//!     .limit(10)
//!     .build();
//!
//! assert_eq!(sql, "SELECT id, name FROM users WHERE age > ? ORDER BY name ASC LIMIT ?");
//! assert_eq!(args, vec![Value::Int(Some(18)), Value::BigInt(Some(10))]);
//! ```

use crate::query::condition::{render_conditions, Condition, Connector};
use crate::value::IntoArgs;
use sea_query::Value;
use std::fmt;
use std::str::FromStr;

/// Sort direction for `ORDER BY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Order {
    #[default]
    Asc,
    Desc,
}

impl Order {
    pub fn as_sql(self) -> &'static str {
        match self {
            Order::Asc => "ASC",
            Order::Desc => "DESC",
        }
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for Order {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "ASC" => Ok(Order::Asc),
            "DESC" => Ok(Order::Desc),
            other => Err(format!("unknown sort direction {other:?}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

impl JoinKind {
    pub fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub kind: JoinKind,
    pub table: String,
    pub on: String,
    pub args: Vec<Value>,
}

/// Accumulated state of one SELECT
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Relation {
    table: String,
    columns: Vec<String>,
    joins: Vec<Join>,
    wheres: Vec<Condition>,
    groups: Vec<String>,
    havings: Vec<Condition>,
    orders: Vec<(String, Order)>,
    limit: Option<u64>,
    offset: Option<u64>,
    explain: bool,
}

impl Relation {
    /// Create an empty relation over `table`, selecting `*`
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Rebind the base table
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Replace the selected columns
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Add a WHERE predicate
    ///
    /// The first predicate starts the clause; later ones are AND-joined.
    pub fn filter(self, cond: &str, args: impl IntoArgs) -> Self {
        self.push_where(Connector::And, cond, args)
    }

    /// Add a predicate AND-joined to the previous one
    pub fn and(self, cond: &str, args: impl IntoArgs) -> Self {
        self.push_where(Connector::And, cond, args)
    }

    /// Add a predicate OR-joined to the previous one
    pub fn or(self, cond: &str, args: impl IntoArgs) -> Self {
        self.push_where(Connector::Or, cond, args)
    }

    fn push_where(mut self, connector: Connector, cond: &str, args: impl IntoArgs) -> Self {
        self.wheres.push(Condition::new(connector, cond, args.into_args()));
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, order: Order) -> Self {
        self.orders.push((column.into(), order));
        self
    }

    /// `LIMIT n`. `limit(0)` selects nothing; leave it unset for no limit.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Add a HAVING predicate, AND-joined to earlier ones
    pub fn having(mut self, cond: &str, args: impl IntoArgs) -> Self {
        self.havings.push(Condition::new(Connector::And, cond, args.into_args()));
        self
    }

    pub fn inner_join(self, table: &str, on: &str) -> Self {
        self.join(JoinKind::Inner, table, on, ())
    }

    pub fn left_join(self, table: &str, on: &str) -> Self {
        self.join(JoinKind::Left, table, on, ())
    }

    /// Register a join whose ON clause may carry its own placeholders
    pub fn join(mut self, kind: JoinKind, table: &str, on: &str, args: impl IntoArgs) -> Self {
        self.joins.push(Join {
            kind,
            table: table.to_string(),
            on: on.to_string(),
            args: args.into_args(),
        });
        self
    }

    /// Prefix the statement with `EXPLAIN`
    pub fn explain(mut self) -> Self {
        self.explain = true;
        self
    }

    /// Render a plain SELECT again, for use as a subquery
    pub(crate) fn without_explain(mut self) -> Self {
        self.explain = false;
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn is_explain(&self) -> bool {
        self.explain
    }

    pub fn has_joins(&self) -> bool {
        !self.joins.is_empty()
    }

    /// Nothing but WHERE predicates: no joins, grouping or pagination
    pub fn only_filters(&self) -> bool {
        self.joins.is_empty()
            && self.groups.is_empty()
            && self.havings.is_empty()
            && self.limit.is_none()
            && self.offset.is_none()
    }

    /// WHERE predicates, in the order they were added
    pub fn conditions(&self) -> &[Condition] {
        &self.wheres
    }

    /// Selected column expressions as rendered (`*` when none were chosen)
    pub fn selected_columns(&self) -> Vec<String> {
        if self.columns.is_empty() {
            return vec![self.qualify("*")];
        }
        self.columns.iter().map(|c| self.qualify(c)).collect()
    }

    /// Render the SELECT and its bind values
    pub fn build(&self) -> (String, Vec<Value>) {
        let mut sql = String::new();
        let mut args = Vec::new();

        if self.explain {
            sql.push_str("EXPLAIN ");
        }
        sql.push_str("SELECT ");
        sql.push_str(&self.selected_columns().join(", "));
        self.render_body(&mut sql, &mut args);

        if !self.orders.is_empty() {
            let orders: Vec<String> = self
                .orders
                .iter()
                .map(|(col, order)| format!("{} {}", self.qualify(col), order))
                .collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&orders.join(", "));
        }

        match (self.limit, self.offset) {
            (Some(limit), _) => {
                sql.push_str(" LIMIT ?");
                args.push(bind_count(limit));
            }
            // SQLite only accepts OFFSET after a LIMIT; -1 is unbounded
            (None, Some(_)) => sql.push_str(" LIMIT -1"),
            (None, None) => {}
        }
        if let Some(offset) = self.offset {
            sql.push_str(" OFFSET ?");
            args.push(bind_count(offset));
        }

        (sql, args)
    }

    /// `SELECT 1 … LIMIT 1` over the same tables and predicates
    pub fn exists_sql(&self) -> (String, Vec<Value>) {
        let mut sql = String::from("SELECT 1");
        let mut args = Vec::new();
        self.render_body(&mut sql, &mut args);
        sql.push_str(" LIMIT 1");
        (sql, args)
    }

    /// `SELECT COUNT(column)` over the same tables and predicates (`*` when
    /// `column` is `None`). Grouped relations count their groups.
    pub fn count_sql(&self, column: Option<&str>) -> (String, Vec<Value>) {
        let target = column.map_or_else(|| "*".to_string(), |c| self.qualify(c));
        let mut args = Vec::new();

        if self.groups.is_empty() {
            let mut sql = format!("SELECT COUNT({target})");
            self.render_body(&mut sql, &mut args);
            return (sql, args);
        }

        let mut inner = format!("SELECT COUNT({target}) AS n");
        self.render_body(&mut inner, &mut args);
        (format!("SELECT COUNT(*) FROM ({inner}) AS grouped"), args)
    }

    /// FROM, JOINs, WHERE, GROUP BY and HAVING
    fn render_body(&self, sql: &mut String, args: &mut Vec<Value>) {
        sql.push_str(" FROM ");
        sql.push_str(&self.table);

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join.kind.as_sql());
            sql.push(' ');
            sql.push_str(&join.table);
            sql.push_str(" ON ");
            sql.push_str(&join.on);
            args.extend(join.args.iter().cloned());
        }

        render_conditions("WHERE", &self.wheres, sql, args);

        if !self.groups.is_empty() {
            let groups: Vec<String> = self.groups.iter().map(|g| self.qualify(g)).collect();
            sql.push_str(" GROUP BY ");
            sql.push_str(&groups.join(", "));
        }

        render_conditions("HAVING", &self.havings, sql, args);
    }

    /// Joined queries share column names across tables; qualify plain
    /// identifiers with the base table.
    fn qualify(&self, column: &str) -> String {
        if self.joins.is_empty() || !(column == "*" || is_plain_identifier(column)) {
            return column.to_string();
        }
        format!("{}.{}", self.table, column)
    }
}

fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn bind_count(n: u64) -> Value {
    Value::BigInt(Some(i64::try_from(n).unwrap_or(i64::MAX)))
}
