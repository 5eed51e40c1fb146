//! Typed select query builder.
//!
//! [`Select<R>`] wraps a [`Relation`] bound to `R`'s table and column set, so
//! terminal operations (in the execution module) hand back `R` values instead
//! of raw rows. Building methods mirror `Relation` one to one.

use crate::model::Record;
use crate::query::relation::{JoinKind, Order, Relation};
use crate::relation::Related;
use crate::value::IntoArgs;
use sea_query::Value;
use std::fmt;
use std::marker::PhantomData;

/// Query builder for selecting records of type `R`
///
/// Returned by [`ActiveRecord::query`](crate::ActiveRecord::query) and friends.
///
/// # Example
///
/// ```ignore
/// use activerow::{ActiveRecord, Order};
///
/// let adults = User::query()
///     .filter("age >=", 18)
///     .order_by("name", Order::Asc)
///     .limit(10)
///     .all(&db)?;
/// ```
pub struct Select<R: Record> {
    pub(crate) relation: Relation,
    _record: PhantomData<R>,
}

impl<R: Record> Select<R> {
    /// Select every column of `R` from its table
    pub fn new() -> Self {
        Self::from_relation(Relation::new(R::table_name()).columns(R::columns().iter().copied()))
    }

    /// Wrap an existing relation; its selected columns must map onto `R`
    pub fn from_relation(relation: Relation) -> Self {
        Self {
            relation,
            _record: PhantomData,
        }
    }

    /// Restrict the selected columns. Unselected fields keep their default values.
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relation = self.relation.columns(columns);
        self
    }

    pub fn filter(mut self, cond: &str, args: impl IntoArgs) -> Self {
        self.relation = self.relation.filter(cond, args);
        self
    }

    pub fn and(mut self, cond: &str, args: impl IntoArgs) -> Self {
        self.relation = self.relation.and(cond, args);
        self
    }

    pub fn or(mut self, cond: &str, args: impl IntoArgs) -> Self {
        self.relation = self.relation.or(cond, args);
        self
    }

    pub fn order_by(mut self, column: impl Into<String>, order: Order) -> Self {
        self.relation = self.relation.order_by(column, order);
        self
    }

    pub fn limit(mut self, n: u64) -> Self {
        self.relation = self.relation.limit(n);
        self
    }

    pub fn offset(mut self, n: u64) -> Self {
        self.relation = self.relation.offset(n);
        self
    }

    pub fn group_by<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relation = self.relation.group_by(columns);
        self
    }

    pub fn having(mut self, cond: &str, args: impl IntoArgs) -> Self {
        self.relation = self.relation.having(cond, args);
        self
    }

    pub fn inner_join(mut self, table: &str, on: &str) -> Self {
        self.relation = self.relation.inner_join(table, on);
        self
    }

    pub fn left_join(mut self, table: &str, on: &str) -> Self {
        self.relation = self.relation.left_join(table, on);
        self
    }

    pub fn join(mut self, kind: JoinKind, table: &str, on: &str, args: impl IntoArgs) -> Self {
        self.relation = self.relation.join(kind, table, on, args);
        self
    }

    /// INNER JOIN the table of an associated record, using the declared relation
    ///
    /// Only registers the join; filter on the joined columns with `filter`.
    pub fn joins<T>(self) -> Self
    where
        T: Record,
        R: Related<T>,
    {
        let def = <R as Related<T>>::to();
        let on = def.join_condition();
        self.inner_join(def.to_tbl, &on)
    }

    pub fn explain(mut self) -> Self {
        self.relation = self.relation.explain();
        self
    }

    /// Apply a reusable query fragment
    ///
    /// ```ignore
    /// fn older_than(q: Select<User>) -> Select<User> { q.filter("age >", 30) }
    /// let users = User::query().scope(older_than).all(&db)?;
    /// ```
    pub fn scope<F>(self, scope: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        scope(self)
    }

    /// Render the SELECT and its bind values
    pub fn build(&self) -> (String, Vec<Value>) {
        self.relation.build()
    }

    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    pub fn into_relation(self) -> Relation {
        self.relation
    }

    /// `table.pk`, valid with or without joins
    pub(crate) fn qualified_primary_key() -> String {
        format!("{}.{}", R::table_name(), R::primary_key_column())
    }
}

impl<R: Record> Default for Select<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> Clone for Select<R> {
    fn clone(&self) -> Self {
        Self::from_relation(self.relation.clone())
    }
}

impl<R: Record> fmt::Debug for Select<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("table", &R::table_name())
            .field("relation", &self.relation)
            .finish()
    }
}
