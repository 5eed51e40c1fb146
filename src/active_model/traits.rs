//! Record lifecycle: finders, validation, persistence and associations.
//!
//! [`ActiveRecord`] is implemented for every [`Record`], so a record type gets
//! the whole surface by implementing the field registry alone:
//!
//! ```ignore
//! use activerow::{ActiveRecord, Params};
//!
//! let (mut user, result) = User::create(&db, Params::new().set("name", "alice"));
//! result?;
//! assert!(user.is_persistent());
//!
//! user.name = "alicia".into();
//! user.save(&db)?;                       // UPDATE, validated
//! user.update_columns(&db, Params::new().set("age", 31))?; // UPDATE age only, not validated
//!
//! let posts = user.related_many::<Post, _>(&db)?;
//! user.delete(&db)?;
//! ```
//!
//! Writes return `Result<(), Errors>`. Validation failures are keyed by field
//! and never reach the database; database failures are reported under
//! [`Errors::BASE`].

use crate::active_model::params::Params;
use crate::executor::{ArError, ArExecutor};
use crate::model::{PrimaryKey, Record};
use crate::query::{DeleteStatement, InsertStatement, Select, UpdateStatement};
use crate::relation::Related;
use crate::validation::{Errors, On, Validator};
use crate::value::IntoArgs;
use sea_query::Value;

#[cfg(feature = "tracing")]
use crate::metrics::tracing_helpers;
#[cfg(feature = "metrics")]
use crate::metrics::METRICS;

/// Lifecycle operations available on every [`Record`]
pub trait ActiveRecord: Record {
    // ------------------------------------------------------------------
    // Finders
    // ------------------------------------------------------------------

    /// Query over every column of the table
    fn query() -> Select<Self> {
        Select::new()
    }

    /// Query selecting only `columns`
    fn select<I, S>(columns: I) -> Select<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::query().select(columns)
    }

    /// Query with one WHERE predicate
    fn filter(cond: &str, args: impl IntoArgs) -> Select<Self> {
        Self::query().filter(cond, args)
    }

    /// Every record
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution or mapping fails.
    fn all<E: ArExecutor + ?Sized>(executor: &E) -> Result<Vec<Self>, ArError> {
        Self::query().all(executor)
    }

    /// Record with primary key `id`, `None` when absent
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution or mapping fails.
    fn find<E: ArExecutor + ?Sized>(executor: &E, id: Self::PrimaryKey) -> Result<Option<Self>, ArError> {
        Self::query().find(executor, id)
    }

    /// First record satisfying `cond`
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution or mapping fails.
    fn find_by<E: ArExecutor + ?Sized>(
        executor: &E,
        cond: &str,
        args: impl IntoArgs,
    ) -> Result<Option<Self>, ArError> {
        Self::query().find_by(executor, cond, args)
    }

    /// Record with the lowest primary key
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution or mapping fails.
    fn first<E: ArExecutor + ?Sized>(executor: &E) -> Result<Option<Self>, ArError> {
        Self::query().first(executor)
    }

    /// Record with the highest primary key
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution or mapping fails.
    fn last<E: ArExecutor + ?Sized>(executor: &E) -> Result<Option<Self>, ArError> {
        Self::query().last(executor)
    }

    /// Whether the table has any record
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution fails.
    fn exists<E: ArExecutor + ?Sized>(executor: &E) -> Result<bool, ArError> {
        Self::query().exists(executor)
    }

    /// `COUNT(column)` over the table, `COUNT(*)` for `None`
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution fails.
    fn count<E: ArExecutor + ?Sized>(executor: &E, column: Option<&str>) -> Result<i64, ArError> {
        Self::query().count(executor, column)
    }

    /// Delete every record of the table
    ///
    /// # Errors
    ///
    /// Returns `Errors` with the database failure under the base key.
    fn delete_all<E: ArExecutor + ?Sized>(executor: &E) -> Result<u64, Errors> {
        Self::query().delete_all(executor)
    }

    // ------------------------------------------------------------------
    // State
    // ------------------------------------------------------------------

    /// Never inserted: the primary key is zero
    fn is_new_record(&self) -> bool {
        self.primary_key().is_zero()
    }

    fn is_persistent(&self) -> bool {
        !self.is_new_record()
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Run the declared rules that apply to the next write (create for new
    /// records, update for persistent ones), then the custom validator
    ///
    /// # Errors
    ///
    /// Returns every failure, keyed by field.
    fn validate(&self) -> Result<(), Errors> {
        let context = if self.is_new_record() {
            On::Create
        } else {
            On::Update
        };

        let mut errors = Errors::new();
        for (field, rule) in Self::rules() {
            let validator = Validator::new(&rule);
            if !validator.applies_to(context) {
                continue;
            }
            let value = self.get(field).unwrap_or(Value::String(None));
            if let Err(messages) = validator.is_valid(&value) {
                errors.set(field, messages);
            }
        }
        self.validate_custom(&mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Validate, then INSERT a new record (assigning its generated primary
    /// key) or UPDATE a persistent one
    ///
    /// An invalid record performs no database I/O. An INSERT the database
    /// ignores (`ON CONFLICT IGNORE`) is a base error and leaves the record new.
    /// An UPDATE that matches no row (the row was deleted, or the primary key
    /// was set by hand) is not an error: the record stays persistent and
    /// nothing is written.
    ///
    /// # Errors
    ///
    /// Returns validation failures keyed by field, or the database failure
    /// under the base key.
    fn save<E: ArExecutor + ?Sized>(&mut self, executor: &E) -> Result<(), Errors> {
        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::lifecycle_span("save", Self::table_name()).entered();

        if let Err(errors) = self.validate() {
            log::debug!("{} rejected by validation: {errors}", Self::table_name());
            #[cfg(feature = "metrics")]
            METRICS.record_validation_failure();
            return Err(errors);
        }
        self.save_without_validation(executor)
    }

    /// [`save`](ActiveRecord::save) without running validation
    ///
    /// # Errors
    ///
    /// Returns the database failure under the base key.
    fn save_without_validation<E: ArExecutor + ?Sized>(&mut self, executor: &E) -> Result<(), Errors> {
        if self.is_new_record() {
            insert_record(self, executor)
        } else {
            let values = self.data_values();
            update_record(&*self, executor, values)
        }
    }

    /// Build a record from `params` and save it
    ///
    /// The record is returned even when saving fails, so the caller can
    /// inspect what was assigned. Params that set a non-zero primary key make
    /// the record persistent, so `create` then runs an UPDATE, which succeeds
    /// without writing anything when no row has that key.
    fn create<E: ArExecutor + ?Sized>(executor: &E, params: Params) -> (Self, Result<(), Errors>) {
        let mut record = Self::default();
        let result = record.assign(&params).and_then(|()| record.save(executor));
        (record, result)
    }

    /// Assign `params`, then validate and save every data column
    ///
    /// # Errors
    ///
    /// Returns assignment or validation failures keyed by field, or the
    /// database failure under the base key.
    fn update<E: ArExecutor + ?Sized>(&mut self, executor: &E, params: Params) -> Result<(), Errors> {
        self.assign(&params)?;
        self.save(executor)
    }

    /// Assign `params` and write only those columns, without validation
    ///
    /// # Errors
    ///
    /// Returns assignment failures keyed by field, a base error for a new
    /// record, or the database failure under the base key.
    fn update_columns<E: ArExecutor + ?Sized>(&mut self, executor: &E, params: Params) -> Result<(), Errors> {
        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::lifecycle_span("update_columns", Self::table_name()).entered();

        if self.is_new_record() {
            return Err(Errors::from_base(format!(
                "cannot update columns of a new {} record",
                Self::table_name()
            )));
        }
        self.assign(&params)?;

        let pk = Self::primary_key_column();
        let values = params
            .columns()
            .filter(|c| *c != pk)
            .filter_map(|c| self.get(c).map(|v| (c.to_string(), v)))
            .collect::<Vec<_>>();
        update_record(&*self, executor, values)
    }

    /// DELETE the row of a persistent record
    ///
    /// The in-memory record keeps its field values, primary key included.
    ///
    /// # Errors
    ///
    /// Returns a base error for a new record, or the database failure under
    /// the base key.
    fn delete<E: ArExecutor + ?Sized>(&self, executor: &E) -> Result<(), Errors> {
        #[cfg(feature = "tracing")]
        let _span = tracing_helpers::lifecycle_span("delete", Self::table_name()).entered();

        if self.is_new_record() {
            return Err(Errors::from_base(format!(
                "cannot delete a new {} record",
                Self::table_name()
            )));
        }
        let (sql, args) = DeleteStatement::new(Self::table_name())
            .filter(Self::primary_key_column(), self.primary_key_value())
            .build();
        executor
            .execute(&sql, &args)
            .map(|_| ())
            .map_err(|err| execution_failed::<Self>("delete", err))
    }

    /// Assign every param to its field
    ///
    /// # Errors
    ///
    /// Returns one message per column that is unknown or whose value does not
    /// decode. Valid columns are still assigned.
    fn assign(&mut self, params: &Params) -> Result<(), Errors> {
        let mut errors = Errors::new();
        for (column, value) in params.iter() {
            if let Err(err) = self.set(column, value.clone()) {
                errors.add(column, err);
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    // ------------------------------------------------------------------
    // Associations
    // ------------------------------------------------------------------

    /// Query over the associated records of type `T`
    fn find_related<T>(&self) -> Select<T>
    where
        T: Record,
        Self: Related<T>,
    {
        let def = <Self as Related<T>>::to();
        let key = self.get(def.from_col).unwrap_or(Value::String(None));
        Select::<T>::new().filter(&def.filter_column(), key)
    }

    /// The associated record (belongs-to / has-one), `None` when absent
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution or mapping fails.
    fn related_one<T, E>(&self, executor: &E) -> Result<Option<T>, ArError>
    where
        T: Record,
        E: ArExecutor + ?Sized,
        Self: Related<T>,
    {
        self.find_related::<T>().one(executor)
    }

    /// Every associated record (has-many)
    ///
    /// # Errors
    ///
    /// Returns `ArError` if execution or mapping fails.
    fn related_many<T, E>(&self, executor: &E) -> Result<Vec<T>, ArError>
    where
        T: Record,
        E: ArExecutor + ?Sized,
        Self: Related<T>,
    {
        self.find_related::<T>().all(executor)
    }

    /// Build an unsaved `T` from `params`, with the foreign key pointing at
    /// this record when `T` holds it (has-many / has-one)
    ///
    /// # Errors
    ///
    /// Returns assignment failures keyed by field.
    fn build_related<T>(&self, params: Params) -> Result<T, Errors>
    where
        T: Record,
        Self: Related<T>,
    {
        let def = <Self as Related<T>>::to();
        let mut related = T::default();
        let mut errors = match related.assign(&params) {
            Ok(()) => Errors::new(),
            Err(errors) => errors,
        };

        if def.is_owner() {
            let key = self.get(def.from_col).unwrap_or(Value::String(None));
            if let Err(err) = related.set(def.to_col, key) {
                errors.add(def.to_col, err);
            }
        }

        if errors.is_empty() {
            Ok(related)
        } else {
            Err(errors)
        }
    }
}

impl<R: Record> ActiveRecord for R {}

fn execution_failed<R: Record>(operation: &str, err: ArError) -> Errors {
    log::warn!("{operation} on {} failed: {err}", R::table_name());
    Errors::from_base(err)
}

fn insert_record<R: Record, E: ArExecutor + ?Sized>(record: &mut R, executor: &E) -> Result<(), Errors> {
    #[cfg(feature = "tracing")]
    let _span = tracing_helpers::lifecycle_span("insert", R::table_name()).entered();

    let (sql, args) = InsertStatement::new(R::table_name())
        .params(record.data_values())
        .build();
    let result = executor
        .execute(&sql, &args)
        .map_err(|err| execution_failed::<R>("insert", err))?;

    if result.rows_affected == 0 {
        log::warn!("insert into {} was ignored by the database", R::table_name());
        return Err(Errors::from_base(format!(
            "{} record was not inserted",
            R::table_name()
        )));
    }
    let id = result
        .last_insert_id
        .ok_or_else(|| Errors::from_base("database did not report the inserted id"))?;
    let pk = R::PrimaryKey::from_insert_id(id).map_err(Errors::from_base)?;
    record.set_primary_key(pk);
    log::debug!("inserted {} {pk}", R::table_name());
    Ok(())
}

fn update_record<R, E, I, K>(record: &R, executor: &E, values: I) -> Result<(), Errors>
where
    R: Record,
    E: ArExecutor + ?Sized,
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    #[cfg(feature = "tracing")]
    let _span = tracing_helpers::lifecycle_span("update", R::table_name()).entered();

    let statement = UpdateStatement::new(R::table_name())
        .params(values)
        .filter(R::primary_key_column(), record.primary_key_value());
    if statement.is_empty() {
        return Ok(());
    }
    let (sql, args) = statement.build();
    let result = executor
        .execute(&sql, &args)
        .map_err(|err| execution_failed::<R>("update", err))?;
    if result.rows_affected == 0 {
        log::debug!("update of {} {} matched no row", R::table_name(), record.primary_key());
    }
    Ok(())
}
