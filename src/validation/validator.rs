//! Evaluation of a single [`Rule`] against a value.

use crate::validation::rule::{Numericality, On, Rule};
use crate::value::inspect::{as_f64, as_i64, as_text, is_null};
use sea_query::Value;

/// Evaluates one rule
///
/// ```rust
/// use activerow::{Rule, Validator, Value};
///
/// let rule = Rule::new().presence().min_length(4);
/// let validator = Validator::new(&rule);
///
/// assert!(validator.is_valid(&Value::String(Some("name".into()))).is_ok());
/// assert_eq!(
///     validator.is_valid(&Value::String(Some("abc".into()))),
///     Err(vec!["is too short (minimum is 4 characters)".to_string()])
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Validator<'a> {
    rule: &'a Rule,
}

impl<'a> Validator<'a> {
    pub fn new(rule: &'a Rule) -> Self {
        Self { rule }
    }

    /// Whether the rule runs in `context`
    pub fn applies_to(&self, context: On) -> bool {
        self.rule.on.applies_to(context)
    }

    /// Check `value`, returning every failure message in check order
    ///
    /// # Errors
    ///
    /// Returns the failure messages when at least one check fails.
    pub fn is_valid(&self, value: &Value) -> Result<(), Vec<String>> {
        let mut messages = Vec::new();
        let rule = self.rule;

        if rule.presence && is_blank(value) {
            messages.push("can't be blank".to_string());
        }

        // NULL only fails presence
        if !is_null(value) {
            let text = as_text(value).unwrap_or_default();

            if let Some(pattern) = &rule.format {
                if !pattern.is_match(&text) {
                    messages.push("is invalid".to_string());
                }
            }

            check_length(rule, &text, &mut messages);

            if let Some(numericality) = &rule.numericality {
                check_numericality(numericality, value, &mut messages);
            }

            if let Some(allowed) = &rule.inclusion {
                let included = allowed.iter().any(|candidate| as_text(candidate).as_deref() == Some(text.as_str()));
                if !included {
                    messages.push("is not included in the list".to_string());
                }
            }
        }

        if messages.is_empty() {
            return Ok(());
        }
        match &rule.message {
            Some(custom) => Err(vec![custom.clone()]),
            None => Err(messages),
        }
    }
}

fn is_blank(value: &Value) -> bool {
    is_null(value) || as_text(value).is_some_and(|s| s.trim().is_empty())
}

fn check_length(rule: &Rule, text: &str, messages: &mut Vec<String>) {
    let length = rule.length;
    if length.minimum.is_none() && length.maximum.is_none() && length.is.is_none() {
        return;
    }
    let count = text.chars().count();
    if let Some(is) = length.is {
        if count != is {
            messages.push(format!("is the wrong length (should be {is} characters)"));
        }
        return;
    }
    if let Some(min) = length.minimum {
        if count < min {
            messages.push(format!("is too short (minimum is {min} characters)"));
        }
    }
    if let Some(max) = length.maximum {
        if count > max {
            messages.push(format!("is too long (maximum is {max} characters)"));
        }
    }
}

fn check_numericality(rule: &Numericality, value: &Value, messages: &mut Vec<String>) {
    let Some(n) = as_f64(value) else {
        messages.push("is not a number".to_string());
        return;
    };

    if rule.only_integer && !is_integer(value, n) {
        messages.push("must be an integer".to_string());
        return;
    }

    if let Some(bound) = rule.greater_than {
        if n <= bound {
            messages.push(format!("must be greater than {bound}"));
        }
    }
    if let Some(bound) = rule.greater_than_or_equal_to {
        if n < bound {
            messages.push(format!("must be greater than or equal to {bound}"));
        }
    }
    if let Some(bound) = rule.less_than {
        if n >= bound {
            messages.push(format!("must be less than {bound}"));
        }
    }
    if let Some(bound) = rule.less_than_or_equal_to {
        if n > bound {
            messages.push(format!("must be less than or equal to {bound}"));
        }
    }
    if let Some(bound) = rule.equal_to {
        if (n - bound).abs() > f64::EPSILON {
            messages.push(format!("must be equal to {bound}"));
        }
    }
    #[allow(clippy::cast_possible_truncation)]
    let whole = n as i64;
    if rule.odd && whole % 2 == 0 {
        messages.push("must be odd".to_string());
    }
    if rule.even && whole % 2 != 0 {
        messages.push("must be even".to_string());
    }
}

fn is_integer(value: &Value, n: f64) -> bool {
    match value {
        Value::String(Some(s)) => s.trim().parse::<i64>().is_ok(),
        Value::Float(_) | Value::Double(_) => n.fract() == 0.0,
        other => as_i64(other).is_some() || matches!(other, Value::BigUnsigned(Some(_))),
    }
}
