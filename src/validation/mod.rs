//! Validation rules and error aggregation.
//!
//! - [`Rule`] declares constraints for one field, [`Validator`] evaluates it
//! - [`Errors`] collects messages per field, plus the `base` key for failures
//!   that belong to no field

pub mod errors;
pub mod rule;
pub mod validator;

pub use errors::Errors;
pub use rule::{Length, Numericality, On, Rule};
pub use validator::Validator;
