//! Query execution methods for [`Select`].
//!
//! Reads return `Result<_, ArError>`: a query that matches nothing is
//! `Ok(None)` or an empty `Vec`, and database failures pass through unchanged.

use crate::executor::{ArError, ArExecutor};
use crate::model::Record;
use crate::query::relation::Order;
use crate::query::select::Select;
use crate::query::statement::DeleteStatement;
use crate::row::{unqualified, Row};
use crate::validation::Errors;
use crate::value::{IntoArgs, ValueType};

impl<R: Record> Select<R> {
    /// Execute the query and map every row onto `R`
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution fails, or `ArError::ParseError` if a
    /// selected column does not decode into its field.
    pub fn all<E: ArExecutor + ?Sized>(self, executor: &E) -> Result<Vec<R>, ArError> {
        let (sql, args) = self.build();
        executor
            .query_all(&sql, &args)?
            .into_iter()
            .map(map_row::<R>)
            .collect()
    }

    /// Execute the query and map its first row
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution or mapping fails.
    pub fn one<E: ArExecutor + ?Sized>(self, executor: &E) -> Result<Option<R>, ArError> {
        let (sql, args) = self.build();
        executor.query_one(&sql, &args)?.map(map_row::<R>).transpose()
    }

    /// Lowest primary key among matching records
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution or mapping fails.
    pub fn first<E: ArExecutor + ?Sized>(self, executor: &E) -> Result<Option<R>, ArError> {
        self.order_by(Self::qualified_primary_key(), Order::Asc)
            .limit(1)
            .one(executor)
    }

    /// Highest primary key among matching records
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution or mapping fails.
    pub fn last<E: ArExecutor + ?Sized>(self, executor: &E) -> Result<Option<R>, ArError> {
        self.order_by(Self::qualified_primary_key(), Order::Desc)
            .limit(1)
            .one(executor)
    }

    /// Matching record with primary key `id`
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution or mapping fails.
    pub fn find<E: ArExecutor + ?Sized>(self, executor: &E, id: R::PrimaryKey) -> Result<Option<R>, ArError> {
        self.filter(&Self::qualified_primary_key(), id.into_value())
            .one(executor)
    }

    /// First matching record that also satisfies `cond`
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution or mapping fails.
    pub fn find_by<E: ArExecutor + ?Sized>(
        self,
        executor: &E,
        cond: &str,
        args: impl IntoArgs,
    ) -> Result<Option<R>, ArError> {
        self.filter(cond, args).one(executor)
    }

    /// Whether any record matches
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution fails.
    pub fn exists<E: ArExecutor + ?Sized>(&self, executor: &E) -> Result<bool, ArError> {
        let (sql, args) = self.relation.exists_sql();
        Ok(executor.query_one(&sql, &args)?.is_some())
    }

    /// `COUNT(column)` over matching records, `COUNT(*)` for `None`
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution fails or the count does not decode.
    pub fn count<E: ArExecutor + ?Sized>(&self, executor: &E, column: Option<&str>) -> Result<i64, ArError> {
        let (sql, args) = self.relation.count_sql(column);
        match executor.query_one(&sql, &args)? {
            Some(row) => row.try_get(0),
            None => Ok(0),
        }
    }

    /// Execute the query and return raw rows (for aggregates and joined columns)
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution fails.
    pub fn rows<E: ArExecutor + ?Sized>(&self, executor: &E) -> Result<Vec<Row>, ArError> {
        let (sql, args) = self.build();
        executor.query_all(&sql, &args)
    }

    /// Execute `EXPLAIN` for the query and return the plan rows
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution fails.
    pub fn explain_plan<E: ArExecutor + ?Sized>(self, executor: &E) -> Result<Vec<Row>, ArError> {
        self.explain().rows(executor)
    }

    /// Delete every matching record and return how many rows went away
    ///
    /// Plain filters become the DELETE's own WHERE clause; relations with joins,
    /// grouping or pagination delete by primary key through a subquery.
    ///
    /// # Errors
    ///
    /// Returns `Errors` with the database failure under the base key.
    pub fn delete_all<E: ArExecutor + ?Sized>(self, executor: &E) -> Result<u64, Errors> {
        let table = R::table_name();
        let (sql, args) = if self.relation.only_filters() {
            DeleteStatement::new(table)
                .conditions(self.relation.conditions())
                .build()
        } else {
            let pk = Self::qualified_primary_key();
            let (sub, args) = self.relation.without_explain().columns([pk]).build();
            (
                format!("DELETE FROM {table} WHERE {} IN ({sub})", R::primary_key_column()),
                args,
            )
        };

        match executor.execute(&sql, &args) {
            Ok(result) => Ok(result.rows_affected),
            Err(err) => {
                log::warn!("delete_all on {table} failed: {err}");
                Err(Errors::from_base(err))
            }
        }
    }
}

/// Build `R` from a row, assigning each column `R` knows by (unqualified) name.
pub(crate) fn map_row<R: Record>(row: Row) -> Result<R, ArError> {
    let mut record = R::default();
    let known = R::columns();
    let columns = row.columns().to_vec();
    for (column, value) in columns.iter().zip(row.into_values()) {
        let name = unqualified(column);
        if !known.contains(&name) {
            log::trace!("{}: ignoring column {column}", R::table_name());
            continue;
        }
        record
            .set(name, value)
            .map_err(|e| ArError::ParseError(format!("{}: {e}", R::table_name())))?;
    }
    Ok(record)
}
