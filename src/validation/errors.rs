//! Field-keyed error aggregation.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Index;

/// Validation and persistence failures, keyed by field name
///
/// Failures that belong to no field (a database error on save, a write
/// against a record that was never inserted) live under [`Errors::BASE`].
/// An `Errors` with no messages means success.
///
/// ```rust
/// use activerow::Errors;
///
/// let mut errors = Errors::new();
/// errors.add("name", "can't be blank");
/// errors.add("name", "is too short (minimum is 4 characters)");
///
/// assert_eq!(errors["name"].len(), 2);
/// assert!(errors["age"].is_empty());
/// assert_eq!(errors.full_messages()[0], "name can't be blank");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Errors {
    messages: BTreeMap<String, Vec<String>>,
}

impl Errors {
    /// Key for failures not attributable to a field
    pub const BASE: &'static str = "base";

    pub fn new() -> Self {
        Self::default()
    }

    /// A single base error
    pub fn from_base(err: impl fmt::Display) -> Self {
        let mut errors = Self::new();
        errors.add(Self::BASE, err);
        errors
    }

    /// Append one message for `field`
    pub fn add(&mut self, field: &str, err: impl fmt::Display) {
        self.messages
            .entry(field.to_string())
            .or_default()
            .push(err.to_string());
    }

    /// Append several messages for `field`, keeping their order
    pub fn set<I, S>(&mut self, field: &str, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut messages = messages.into_iter().map(Into::into).peekable();
        if messages.peek().is_none() {
            return;
        }
        self.messages
            .entry(field.to_string())
            .or_default()
            .extend(messages);
    }

    /// Messages for `field`, empty when it has none
    pub fn messages(&self, field: &str) -> &[String] {
        self.messages.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn base(&self) -> &[String] {
        self.messages(Self::BASE)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.values().all(Vec::is_empty)
    }

    /// Total number of messages across all fields
    pub fn len(&self) -> usize {
        self.messages.values().map(Vec::len).sum()
    }

    /// Fields with at least one message, in lexical order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.messages
            .iter()
            .filter(|(_, msgs)| !msgs.is_empty())
            .map(|(field, _)| field.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.messages
            .iter()
            .map(|(field, msgs)| (field.as_str(), msgs.as_slice()))
    }

    /// `"<field> <message>"` for every message; base messages stand alone
    pub fn full_messages(&self) -> Vec<String> {
        self.iter()
            .flat_map(|(field, msgs)| {
                msgs.iter().map(move |msg| {
                    if field == Self::BASE {
                        msg.clone()
                    } else {
                        format!("{field} {msg}")
                    }
                })
            })
            .collect()
    }

    /// Append every message of `other`
    pub fn merge(&mut self, other: Errors) {
        for (field, msgs) in other.messages {
            self.set(&field, msgs);
        }
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl Index<&str> for Errors {
    type Output = [String];

    fn index(&self, field: &str) -> &[String] {
        self.messages(field)
    }
}

impl fmt::Display for Errors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_messages().join("; "))
    }
}

impl std::error::Error for Errors {}
