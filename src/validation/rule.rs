//! Declarative validation rules.
//!
//! A [`Rule`] is declared once per field (see [`Record::rules`](crate::Record::rules))
//! and evaluated against the field's value each time the record is validated.
//!
//! ```rust
//! use activerow::{Numericality, On, Rule};
//! use regex::Regex;
//!
//! let name = Rule::new().presence().length(4, 6);
//! let email = Rule::new().format(Regex::new(r"^[^@\s]+@[^@\s]+$").unwrap());
//! let age = Rule::new().numericality(Numericality::new().only_integer().greater_than_or_equal_to(0.0));
//! let plan = Rule::new().inclusion(["free", "pro"]).on(On::Create);
//! ```

use crate::value::IntoArgs;
use regex::Regex;
use sea_query::Value;

/// When a rule runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum On {
    /// Every save
    #[default]
    Save,
    /// Only when inserting a new record
    Create,
    /// Only when updating a persistent record
    Update,
}

impl On {
    /// Whether a rule declared with `self` runs in `context` (`Create` or `Update`)
    pub fn applies_to(self, context: On) -> bool {
        self == On::Save || self == context
    }
}

/// Numeric constraints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Numericality {
    pub only_integer: bool,
    pub greater_than: Option<f64>,
    pub greater_than_or_equal_to: Option<f64>,
    pub less_than: Option<f64>,
    pub less_than_or_equal_to: Option<f64>,
    pub equal_to: Option<f64>,
    pub odd: bool,
    pub even: bool,
}

impl Numericality {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn only_integer(mut self) -> Self {
        self.only_integer = true;
        self
    }

    pub fn greater_than(mut self, n: f64) -> Self {
        self.greater_than = Some(n);
        self
    }

    pub fn greater_than_or_equal_to(mut self, n: f64) -> Self {
        self.greater_than_or_equal_to = Some(n);
        self
    }

    pub fn less_than(mut self, n: f64) -> Self {
        self.less_than = Some(n);
        self
    }

    pub fn less_than_or_equal_to(mut self, n: f64) -> Self {
        self.less_than_or_equal_to = Some(n);
        self
    }

    pub fn equal_to(mut self, n: f64) -> Self {
        self.equal_to = Some(n);
        self
    }

    /// Implies `only_integer`
    pub fn odd(mut self) -> Self {
        self.odd = true;
        self.only_integer = true;
        self
    }

    /// Implies `only_integer`
    pub fn even(mut self) -> Self {
        self.even = true;
        self.only_integer = true;
        self
    }
}

/// Length constraints, in characters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Length {
    pub minimum: Option<usize>,
    pub maximum: Option<usize>,
    pub is: Option<usize>,
}

/// One field's validation rule
#[derive(Debug, Clone, Default)]
pub struct Rule {
    pub(crate) presence: bool,
    pub(crate) format: Option<Regex>,
    pub(crate) length: Length,
    pub(crate) numericality: Option<Numericality>,
    pub(crate) inclusion: Option<Vec<Value>>,
    pub(crate) on: On,
    pub(crate) message: Option<String>,
}

impl Rule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject NULL, empty and whitespace-only values
    pub fn presence(mut self) -> Self {
        self.presence = true;
        self
    }

    /// Text must match `pattern`
    pub fn format(mut self, pattern: Regex) -> Self {
        self.format = Some(pattern);
        self
    }

    pub fn min_length(mut self, n: usize) -> Self {
        self.length.minimum = Some(n);
        self
    }

    pub fn max_length(mut self, n: usize) -> Self {
        self.length.maximum = Some(n);
        self
    }

    /// Inclusive `min..=max` characters
    pub fn length(self, min: usize, max: usize) -> Self {
        self.min_length(min).max_length(max)
    }

    /// Exactly `n` characters; takes precedence over minimum and maximum
    pub fn exact_length(mut self, n: usize) -> Self {
        self.length.is = Some(n);
        self
    }

    pub fn numericality(mut self, numericality: Numericality) -> Self {
        self.numericality = Some(numericality);
        self
    }

    /// Value must equal one of `values`
    pub fn inclusion(mut self, values: impl IntoArgs) -> Self {
        self.inclusion = Some(values.into_args());
        self
    }

    pub fn on(mut self, on: On) -> Self {
        self.on = on;
        self
    }

    /// Report `message` instead of the built-in messages when the rule fails
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn context(&self) -> On {
        self.on
    }
}
