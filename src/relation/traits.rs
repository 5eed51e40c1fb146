//! Association declaration between two record types.

use crate::model::Record;
use crate::relation::def::RelationDef;

/// Declares how `Self` reaches `T`
///
/// Implement once per direction:
///
/// ```ignore
/// impl Related<Post> for User {
///     fn to() -> RelationDef {
///         RelationDef::has_many::<User, Post>("user_id")
///     }
/// }
///
/// impl Related<User> for Post {
///     fn to() -> RelationDef {
///         RelationDef::belongs_to::<Post, User>("user_id")
///     }
/// }
/// ```
pub trait Related<T: Record>: Record {
    fn to() -> RelationDef;
}
