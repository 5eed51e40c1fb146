//! Variant-agnostic views over `sea_query::Value`.
//!
//! SQLite hands back every integer as a 64-bit value and every NULL without a
//! type, so decoding and validation look at values through these helpers instead
//! of matching a single variant.

use sea_query::Value;

/// Returns `true` for any `None` variant.
pub fn is_null(value: &Value) -> bool {
    matches!(
        value,
        Value::Bool(None)
            | Value::TinyInt(None)
            | Value::SmallInt(None)
            | Value::Int(None)
            | Value::BigInt(None)
            | Value::TinyUnsigned(None)
            | Value::SmallUnsigned(None)
            | Value::Unsigned(None)
            | Value::BigUnsigned(None)
            | Value::Float(None)
            | Value::Double(None)
            | Value::String(None)
            | Value::Char(None)
            | Value::Bytes(None)
            | Value::Json(None)
    )
}

/// The integer carried by any integer variant. `BigUnsigned` values above
/// `i64::MAX` are not representable and yield `None`.
pub fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::TinyInt(Some(v)) => Some(i64::from(*v)),
        Value::SmallInt(Some(v)) => Some(i64::from(*v)),
        Value::Int(Some(v)) => Some(i64::from(*v)),
        Value::BigInt(Some(v)) => Some(*v),
        Value::TinyUnsigned(Some(v)) => Some(i64::from(*v)),
        Value::SmallUnsigned(Some(v)) => Some(i64::from(*v)),
        Value::Unsigned(Some(v)) => Some(i64::from(*v)),
        Value::BigUnsigned(Some(v)) => i64::try_from(*v).ok(),
        _ => None,
    }
}

/// The number carried by any numeric variant, or by a string that parses as one.
pub fn as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Float(Some(v)) => Some(f64::from(*v)),
        Value::Double(Some(v)) => Some(*v),
        #[allow(clippy::cast_precision_loss)]
        Value::BigUnsigned(Some(v)) => Some(*v as f64),
        Value::String(Some(s)) => s.trim().parse::<f64>().ok(),
        #[allow(clippy::cast_precision_loss)]
        other => as_i64(other).map(|v| v as f64),
    }
}

/// Text view used by presence, length and format checks.
pub fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(Some(s)) => Some(s.clone()),
        Value::Char(Some(c)) => Some(c.to_string()),
        Value::Bool(Some(b)) => Some(b.to_string()),
        Value::Float(Some(v)) => Some(v.to_string()),
        Value::Double(Some(v)) => Some(v.to_string()),
        Value::BigUnsigned(Some(v)) => Some(v.to_string()),
        Value::Json(Some(j)) => Some(j.to_string()),
        other => as_i64(other).map(|v| v.to_string()),
    }
}

/// A short, stable name for the variant, used in error messages.
pub fn variant_name(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "Bool",
        Value::TinyInt(_) => "TinyInt",
        Value::SmallInt(_) => "SmallInt",
        Value::Int(_) => "Int",
        Value::BigInt(_) => "BigInt",
        Value::TinyUnsigned(_) => "TinyUnsigned",
        Value::SmallUnsigned(_) => "SmallUnsigned",
        Value::Unsigned(_) => "Unsigned",
        Value::BigUnsigned(_) => "BigUnsigned",
        Value::Float(_) => "Float",
        Value::Double(_) => "Double",
        Value::String(_) => "String",
        Value::Char(_) => "Char",
        Value::Bytes(_) => "Bytes",
        Value::Json(_) => "Json",
        _ => "Unsupported",
    }
}
