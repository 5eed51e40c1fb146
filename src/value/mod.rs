//! Value type system for activerow
//!
//! This module provides traits for type-safe value conversions between Rust types
//! and `sea_query::Value`, the bind-value currency of every statement the crate runs.
//!
//! ## Traits
//!
//! - **`ValueType`** - Maps Rust types to their corresponding `sea_query::Value` variant
//! - **`TryGetable`** - Safe value extraction with error handling
//! - **`IntoArgs`** - Expands call arguments (scalars, lists, tuples) into bind values

pub mod args;
pub mod inspect;
pub mod try_getable;
pub mod types;

pub use args::IntoArgs;
pub use try_getable::{TryGetable, ValueExtractionError};
pub use types::ValueType;
