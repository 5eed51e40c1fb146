//! Conversion of call arguments into ordered bind values.
//!
//! Every predicate method (`filter`, `and`, `or`, `having`) takes its bind values as
//! one `IntoArgs` argument, so a single scalar, an IN-list and a handful of mixed
//! values all go through the same parameter:
//!
//! ```rust
//! use activerow::IntoArgs;
//! use sea_query::Value;
//!
//! assert_eq!("test".into_args(), vec![Value::String(Some("test".to_string()))]);
//! assert_eq!([1, 2].into_args(), vec![Value::Int(Some(1)), Value::Int(Some(2))]);
//! assert_eq!((18, "x").into_args().len(), 2);
//! assert!(().into_args().is_empty());
//! ```

use crate::value::ValueType;
use sea_query::Value;

/// Trait for anything that expands into a positional argument list.
pub trait IntoArgs {
    /// Convert into bind values, preserving left-to-right order.
    fn into_args(self) -> Vec<Value>;
}

impl IntoArgs for () {
    fn into_args(self) -> Vec<Value> {
        Vec::new()
    }
}

impl IntoArgs for Value {
    fn into_args(self) -> Vec<Value> {
        vec![self]
    }
}

macro_rules! impl_into_args_scalar {
    ($($type:ty),* $(,)?) => {
        $(
            impl IntoArgs for $type {
                fn into_args(self) -> Vec<Value> {
                    vec![self.into_value()]
                }
            }

            impl IntoArgs for Option<$type> {
                fn into_args(self) -> Vec<Value> {
                    vec![self.into_value()]
                }
            }
        )*
    };
}

impl_into_args_scalar!(
    i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, bool, char, String, &str,
    serde_json::Value,
);

impl<T: ValueType> IntoArgs for Vec<T> {
    fn into_args(self) -> Vec<Value> {
        self.into_iter().map(ValueType::into_value).collect()
    }
}

impl<T: ValueType, const N: usize> IntoArgs for [T; N] {
    fn into_args(self) -> Vec<Value> {
        self.into_iter().map(ValueType::into_value).collect()
    }
}

impl<T: ValueType + Clone> IntoArgs for &[T] {
    fn into_args(self) -> Vec<Value> {
        self.iter().cloned().map(ValueType::into_value).collect()
    }
}

macro_rules! impl_into_args_tuple {
    ($($name:ident),+) => {
        impl<$($name: ValueType),+> IntoArgs for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_args(self) -> Vec<Value> {
                let ($($name,)+) = self;
                vec![$($name.into_value()),+]
            }
        }
    };
}

impl_into_args_tuple!(A, B);
impl_into_args_tuple!(A, B, C);
impl_into_args_tuple!(A, B, C, D);
impl_into_args_tuple!(A, B, C, D, E);
impl_into_args_tuple!(A, B, C, D, E, F);

/// `Value` is not a `ValueType` (it is already converted), so mixed lists of
/// prebuilt values go through this impl.
impl IntoArgs for Vec<Value> {
    fn into_args(self) -> Vec<Value> {
        self
    }
}
