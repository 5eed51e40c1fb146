//! Associations between record types.
//!
//! - [`RelationDef`] holds the key columns of one association
//! - [`Related`] declares an association per record pair
//!
//! Association accessors live on [`ActiveRecord`](crate::ActiveRecord)
//! (`find_related`, `related_one`, `related_many`, `build_related`) and joins on
//! [`Select::joins`](crate::Select::joins).

pub mod def;
pub mod traits;

pub use def::{RelationDef, RelationType};
pub use traits::Related;
