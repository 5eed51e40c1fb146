//! Record lifecycle operations.
//!
//! - **Traits**: [`ActiveRecord`], implemented for every [`Record`](crate::Record):
//!   finders, validation, `save`/`create`/`update`/`update_columns`/`delete`
//!   and association helpers
//! - **Params**: [`Params`], ordered column assignments consumed by the
//!   writing operations

pub mod params;
pub mod traits;

#[doc(inline)]
pub use params::Params;
#[doc(inline)]
pub use traits::ActiveRecord;
