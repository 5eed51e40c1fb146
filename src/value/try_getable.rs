//! TryGetable trait for safe value extraction
//!
//! Decoding goes from a `sea_query::Value` (a bind value or a column read back from a
//! row) into a record's field type. Integer targets accept any integer variant whose
//! value fits, because drivers do not preserve the declared width of a column.

use crate::value::inspect::{as_i64, is_null, variant_name};
use crate::value::ValueType;
use sea_query::Value;

/// Error type for value extraction failures
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueExtractionError {
    /// The value is null (None variant)
    NullValue,
    /// The value type doesn't match the expected type
    TypeMismatch {
        expected: String,
        actual: String,
    },
    /// Value conversion failed (e.g., overflow, invalid format)
    ConversionError(String),
}

impl std::fmt::Display for ValueExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueExtractionError::NullValue => write!(f, "Value is null"),
            ValueExtractionError::TypeMismatch { expected, actual } => {
                write!(f, "Type mismatch: expected {}, got {}", expected, actual)
            }
            ValueExtractionError::ConversionError(msg) => {
                write!(f, "Conversion error: {}", msg)
            }
        }
    }
}

impl std::error::Error for ValueExtractionError {}

/// Trait for safe value extraction with error handling
///
/// ## Usage
///
/// ```rust
/// use activerow::{TryGetable, ValueExtractionError};
/// use sea_query::Value;
///
/// let value = Value::BigInt(Some(42));
/// let result: Result<i32, ValueExtractionError> = TryGetable::try_get(value);
/// assert_eq!(result, Ok(42));
///
/// let null_value = Value::String(None);
/// let result: Result<i32, ValueExtractionError> = TryGetable::try_get(null_value);
/// assert!(matches!(result, Err(ValueExtractionError::NullValue)));
/// ```
pub trait TryGetable: ValueType {
    /// Try to extract a value from `sea_query::Value`, returning an error if extraction fails.
    ///
    /// Returns:
    /// - `Ok(T)` if the value matches the expected type and is not null
    /// - `Err(ValueExtractionError::NullValue)` if the value is null
    /// - `Err(ValueExtractionError::TypeMismatch)` if the value type doesn't match
    /// - `Err(ValueExtractionError::ConversionError)` if conversion fails (e.g., overflow)
    fn try_get(value: Value) -> Result<Self, ValueExtractionError>;

    /// Try to extract a value, allowing null values to return `None`.
    fn try_get_opt(value: Value) -> Result<Option<Self>, ValueExtractionError> {
        match Self::try_get(value) {
            Ok(v) => Ok(Some(v)),
            Err(ValueExtractionError::NullValue) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

fn mismatch(expected: &str, value: &Value) -> ValueExtractionError {
    ValueExtractionError::TypeMismatch {
        expected: expected.to_string(),
        actual: variant_name(value).to_string(),
    }
}

macro_rules! impl_try_getable_int {
    ($type:ty) => {
        impl TryGetable for $type {
            fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
                if is_null(&value) {
                    return Err(ValueExtractionError::NullValue);
                }
                if let Value::BigUnsigned(Some(v)) = value {
                    return <$type>::try_from(v).map_err(|_| {
                        ValueExtractionError::ConversionError(format!(
                            "{} overflows {}",
                            v,
                            stringify!($type)
                        ))
                    });
                }
                let wide = as_i64(&value).ok_or_else(|| mismatch("integer", &value))?;
                <$type>::try_from(wide).map_err(|_| {
                    ValueExtractionError::ConversionError(format!(
                        "{} overflows {}",
                        wide,
                        stringify!($type)
                    ))
                })
            }
        }
    };
}

impl_try_getable_int!(i8);
impl_try_getable_int!(i16);
impl_try_getable_int!(i32);
impl_try_getable_int!(i64);
impl_try_getable_int!(u8);
impl_try_getable_int!(u16);
impl_try_getable_int!(u32);
impl_try_getable_int!(u64);

impl TryGetable for f64 {
    fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
        match value {
            Value::Double(Some(v)) => Ok(v),
            Value::Float(Some(v)) => Ok(f64::from(v)),
            ref other if is_null(other) => Err(ValueExtractionError::NullValue),
            #[allow(clippy::cast_precision_loss)]
            ref other => as_i64(other)
                .map(|v| v as f64)
                .ok_or_else(|| mismatch("Double", other)),
        }
    }
}

impl TryGetable for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
        f64::try_get(value).map(|v| v as f32)
    }
}

impl TryGetable for bool {
    fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
        match value {
            Value::Bool(Some(b)) => Ok(b),
            ref other if is_null(other) => Err(ValueExtractionError::NullValue),
            // SQLite stores booleans as 0/1 integers
            ref other => match as_i64(other) {
                Some(0) => Ok(false),
                Some(1) => Ok(true),
                Some(n) => Err(ValueExtractionError::ConversionError(format!(
                    "{} is not a boolean",
                    n
                ))),
                None => Err(mismatch("Bool", other)),
            },
        }
    }
}

impl TryGetable for String {
    fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
        match value {
            Value::String(Some(s)) => Ok(s),
            Value::Char(Some(c)) => Ok(c.to_string()),
            ref other if is_null(other) => Err(ValueExtractionError::NullValue),
            ref other => Err(mismatch("String", other)),
        }
    }
}

impl TryGetable for char {
    fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
        match value {
            Value::Char(Some(c)) => Ok(c),
            Value::String(Some(s)) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(c),
                    _ => Err(ValueExtractionError::ConversionError(format!(
                        "{:?} is not a single character",
                        s
                    ))),
                }
            }
            ref other if is_null(other) => Err(ValueExtractionError::NullValue),
            ref other => Err(mismatch("Char", other)),
        }
    }
}

impl TryGetable for Vec<u8> {
    fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
        match value {
            Value::Bytes(Some(b)) => Ok(b),
            Value::String(Some(s)) => Ok(s.into_bytes()),
            ref other if is_null(other) => Err(ValueExtractionError::NullValue),
            ref other => Err(mismatch("Bytes", other)),
        }
    }
}

impl TryGetable for serde_json::Value {
    fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
        match value {
            Value::Json(Some(v)) => Ok(*v),
            // JSON columns come back from SQLite as text
            Value::String(Some(s)) => serde_json::from_str(&s)
                .map_err(|e| ValueExtractionError::ConversionError(e.to_string())),
            ref other if is_null(other) => Err(ValueExtractionError::NullValue),
            ref other => Err(mismatch("Json", other)),
        }
    }
}

impl<T: TryGetable> TryGetable for Option<T> {
    fn try_get(value: Value) -> Result<Self, ValueExtractionError> {
        T::try_get_opt(value)
    }
}
