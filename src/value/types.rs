//! ValueType trait for type-safe value conversions
//!
//! The `ValueType` trait maps Rust field types to their corresponding `sea_query::Value`
//! variant. Record implementations use it in `Record::get`, and the query builders use
//! it (through [`IntoArgs`](crate::value::IntoArgs)) to turn call arguments into bind values.
//!
//! ## Usage
//!
//! ```rust
//! use activerow::ValueType;
//! use sea_query::Value;
//!
//! let value: Value = 42i32.into_value();
//! assert_eq!(value, Value::Int(Some(42)));
//!
//! let missing: Option<i32> = None;
//! assert_eq!(missing.into_value(), Value::Int(None));
//! ```
//!
//! The trait is implemented for:
//!
//! - Integer types: `i8`, `i16`, `i32`, `i64`, `u8`, `u16`, `u32`, `u64`
//! - Floating point: `f32`, `f64`
//! - Boolean: `bool`
//! - Text: `String`, `&str`, `char`
//! - Binary: `Vec<u8>`
//! - JSON: `serde_json::Value`
//! - `Option<T>` for all of the above

use sea_query::Value;

/// Trait for mapping Rust types to their corresponding `sea_query::Value` variant.
pub trait ValueType: Sized {
    /// Convert this value into a `sea_query::Value`.
    fn into_value(self) -> Value;

    /// Return the null variant for this type.
    ///
    /// This is used by `Option<T>` to create the appropriate null `Value` variant
    /// when converting `None`.
    fn null_value() -> Value;
}

macro_rules! impl_value_type {
    ($type:ty, $variant:ident) => {
        impl ValueType for $type {
            fn into_value(self) -> Value {
                Value::$variant(Some(self))
            }

            fn null_value() -> Value {
                Value::$variant(None)
            }
        }
    };
}

impl_value_type!(i8, TinyInt);
impl_value_type!(i16, SmallInt);
impl_value_type!(i32, Int);
impl_value_type!(i64, BigInt);
impl_value_type!(u8, TinyUnsigned);
impl_value_type!(u16, SmallUnsigned);
impl_value_type!(u32, Unsigned);
impl_value_type!(u64, BigUnsigned);
impl_value_type!(f32, Float);
impl_value_type!(f64, Double);
impl_value_type!(bool, Bool);
impl_value_type!(char, Char);
impl_value_type!(String, String);
impl_value_type!(Vec<u8>, Bytes);

impl ValueType for &str {
    fn into_value(self) -> Value {
        Value::String(Some(self.to_string()))
    }

    fn null_value() -> Value {
        Value::String(None)
    }
}

impl ValueType for serde_json::Value {
    fn into_value(self) -> Value {
        Value::Json(Some(Box::new(self)))
    }

    fn null_value() -> Value {
        Value::Json(None)
    }
}

impl<T: ValueType> ValueType for Option<T> {
    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => T::null_value(),
        }
    }

    fn null_value() -> Value {
        T::null_value()
    }
}
