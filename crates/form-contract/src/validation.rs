//! Validation results
//!
//! A [`ValidationResult`] maps every declared field to at most one error. The
//! form is valid exactly when no field carries an error.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Rule id reported when a value has the wrong kind for its field
pub const TYPE_RULE_ID: &str = "type";

/// The first failing rule of one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the field that failed
    pub field: String,
    /// Id of the rule that produced the message
    pub rule: String,
    /// Human-readable message
    pub message: String,
}

impl FieldError {
    pub fn new(
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Per-field outcome of validating a whole form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationResult {
    fields: BTreeMap<String, Option<FieldError>>,
}

impl ValidationResult {
    /// An empty result; valid until a failing field is recorded
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome for one field
    pub fn record(&mut self, field: impl Into<String>, error: Option<FieldError>) {
        self.fields.insert(field.into(), error);
    }

    /// True iff every field's error is absent
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(Option::is_none)
    }

    /// Message for a field, if it failed
    pub fn error(&self, field: &str) -> Option<&str> {
        self.field_error(field).map(|e| e.message.as_str())
    }

    pub fn field_error(&self, field: &str) -> Option<&FieldError> {
        self.fields.get(field).and_then(Option::as_ref)
    }

    /// Whether the field was part of the validated set
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// All failing fields, ordered by name
    pub fn errors(&self) -> impl Iterator<Item = &FieldError> {
        self.fields.values().filter_map(Option::as_ref)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    /// Names of every validated field
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            return write!(f, "valid");
        }
        let messages: Vec<String> = self.errors().map(ToString::to_string).collect();
        write!(f, "invalid ({})", messages.join("; "))
    }
}
