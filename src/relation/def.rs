//! RelationDef struct for storing relationship metadata
//!
//! A `RelationDef` records which column on which table points at which column
//! on the other table. It renders both the JOIN condition used by
//! [`Select::joins`](crate::Select::joins) and the filter column used by the
//! association accessors.

use crate::model::Record;

/// Type of relationship between records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationType {
    /// One-to-one relationship, foreign key on the other table
    HasOne,
    /// One-to-many relationship, foreign key on the other table
    HasMany,
    /// Many-to-one relationship, foreign key on this table
    BelongsTo,
}

/// Defines a relationship from one record type to another
///
/// `from_*` is the declaring side, `to_*` the associated side.
///
/// # Example
///
/// ```ignore
/// // posts.user_id -> users.id
/// let def = RelationDef::belongs_to::<Post, User>("user_id");
/// assert_eq!(def.join_condition(), "users.id = posts.user_id");
///
/// // users.id <- posts.user_id
/// let def = RelationDef::has_many::<User, Post>("user_id");
/// assert_eq!(def.join_condition(), "posts.user_id = users.id");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelationDef {
    /// Type of relationship
    pub rel_type: RelationType,
    /// Declaring table
    pub from_tbl: &'static str,
    /// Associated table
    pub to_tbl: &'static str,
    /// Key column on the declaring table
    pub from_col: &'static str,
    /// Key column on the associated table
    pub to_col: &'static str,
}

impl RelationDef {
    /// `F` holds `foreign_key`, which references `T`'s primary key
    pub fn belongs_to<F: Record, T: Record>(foreign_key: &'static str) -> Self {
        Self {
            rel_type: RelationType::BelongsTo,
            from_tbl: F::table_name(),
            to_tbl: T::table_name(),
            from_col: foreign_key,
            to_col: T::primary_key_column(),
        }
    }

    /// Many `T` hold `foreign_key`, which references `F`'s primary key
    pub fn has_many<F: Record, T: Record>(foreign_key: &'static str) -> Self {
        Self {
            rel_type: RelationType::HasMany,
            from_tbl: F::table_name(),
            to_tbl: T::table_name(),
            from_col: F::primary_key_column(),
            to_col: foreign_key,
        }
    }

    /// At most one `T` holds `foreign_key`, which references `F`'s primary key
    pub fn has_one<F: Record, T: Record>(foreign_key: &'static str) -> Self {
        Self {
            rel_type: RelationType::HasOne,
            ..Self::has_many::<F, T>(foreign_key)
        }
    }

    /// `to_tbl.to_col = from_tbl.from_col`
    pub fn join_condition(&self) -> String {
        format!(
            "{}.{} = {}.{}",
            self.to_tbl, self.to_col, self.from_tbl, self.from_col
        )
    }

    /// `to_tbl.to_col`, compared against the declaring record's `from_col` value
    pub fn filter_column(&self) -> String {
        format!("{}.{}", self.to_tbl, self.to_col)
    }

    /// The foreign key lives on the associated side
    pub fn is_owner(&self) -> bool {
        matches!(self.rel_type, RelationType::HasMany | RelationType::HasOne)
    }
}
