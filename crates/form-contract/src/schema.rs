//! Form schemas
//!
//! A [`Schema`] is an immutable, ordered list of [`FieldSchema`]s. Validation
//! is a pure function of the schema and a full [`FormValues`] set: every
//! declared field is checked on every call.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{FormError, Result};
use crate::rules::{MinLength, Required, Rule, StrongText};
use crate::validation::{FieldError, ValidationResult, TYPE_RULE_ID};
use crate::value::{FieldKind, FieldValue, FormValues};

/// Name of the agreement checkbox in the standard form
pub const AGREE_FIELD: &str = "agree";

/// Name of the text input in the standard form
pub const TEXT_FIELD: &str = "text";

/// Message for an empty text field
pub const TEXT_REQUIRED_MESSAGE: &str = "Text is required";

/// Message for text missing an uppercase letter or digit
pub const TEXT_PATTERN_MESSAGE: &str =
    "Text must include at least one uppercase letter and one number";

/// Message for text shorter than the configured minimum
pub fn text_min_length_message(min_length: usize) -> String {
    format!("Text must be at least {} characters long", min_length)
}

/// One named field and its rule chain
#[derive(Clone)]
pub struct FieldSchema {
    name: String,
    kind: FieldKind,
    rules: Vec<Arc<dyn Rule>>,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            rules: Vec::new(),
        }
    }

    /// A boolean field; any boolean is accepted unless rules say otherwise
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    /// A string field
    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    /// Append a rule to the end of the chain
    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Append an already shared rule to the end of the chain
    pub fn shared_rule(mut self, rule: Arc<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    pub fn default_value(&self) -> FieldValue {
        self.kind.default_value()
    }

    /// Validate one value, treating a missing value as the kind's default.
    ///
    /// A value of the wrong kind fails with a type message before any rule
    /// runs; otherwise the first rule to report a violation wins.
    pub fn validate(&self, value: Option<&FieldValue>) -> Option<FieldError> {
        let default;
        let value = match value {
            Some(v) => v,
            None => {
                default = self.default_value();
                &default
            }
        };

        if value.kind() != self.kind {
            return Some(FieldError::new(
                &self.name,
                TYPE_RULE_ID,
                format!("Expected {}, received {}", self.kind, value.kind()),
            ));
        }

        self.rules.iter().find_map(|rule| {
            rule.violation(value)
                .map(|message| FieldError::new(&self.name, rule.id(), message))
        })
    }
}

impl fmt::Debug for FieldSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule_ids: Vec<&str> = self.rules.iter().map(|r| r.id()).collect();
        f.debug_struct("FieldSchema")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("rules", &rule_ids)
            .finish()
    }
}

/// Immutable description of every field in a form
#[derive(Debug, Clone)]
pub struct Schema {
    fields: Vec<FieldSchema>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Fields in declaration order
    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn declares(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Default value of every declared field
    pub fn defaults(&self) -> FormValues {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.default_value()))
            .collect()
    }

    /// Validate the full value set
    pub fn validate(&self, values: &FormValues) -> ValidationResult {
        let mut result = ValidationResult::new();
        for field in &self.fields {
            result.record(field.name.clone(), field.validate(values.get(&field.name)));
        }
        result
    }

    /// Produce the payload for a submission: declared fields only, with
    /// missing ones filled from defaults.
    pub fn parse(&self, values: &FormValues) -> FormValues {
        self.fields
            .iter()
            .map(|f| {
                let value = values
                    .get(&f.name)
                    .cloned()
                    .unwrap_or_else(|| f.default_value());
                (f.name.clone(), value)
            })
            .collect()
    }
}

/// Builder for [`Schema`], rejecting duplicate names and misplaced rules
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    fields: Vec<FieldSchema>,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Result<Schema> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(FormError::DuplicateField(field.name.clone()));
            }
            if let Some(rule) = field.rules.iter().find(|r| !r.applies_to(field.kind)) {
                return Err(FormError::RuleKindMismatch {
                    rule: rule.id().to_string(),
                    field: field.name.clone(),
                    kind: field.kind.to_string(),
                });
            }
        }
        Ok(Schema {
            fields: self.fields,
        })
    }
}

/// Build the standard two-field schema.
///
/// `agree` is a plain boolean. `text` is checked, in order, for being
/// non-empty, for having at least `min_length` characters, and for holding an
/// uppercase letter and a digit in at least 5 characters. The last rule keeps
/// its own floor of 5 whatever `min_length` is.
pub fn create_schema(min_length: usize) -> Schema {
    let agree = FieldSchema::boolean(AGREE_FIELD);
    let text = FieldSchema::text(TEXT_FIELD)
        .rule(Required::with_message(TEXT_REQUIRED_MESSAGE))
        .rule(MinLength::with_message(
            min_length,
            text_min_length_message(min_length),
        ))
        .rule(StrongText::with_message(TEXT_PATTERN_MESSAGE));

    // Both fields are distinct and every rule targets strings.
    Schema {
        fields: vec![agree, text],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_values(text: &str) -> FormValues {
        FormValues::new().with(AGREE_FIELD, false).with(TEXT_FIELD, text)
    }

    #[test]
    fn test_create_schema_declares_two_fields() {
        let schema = create_schema(5);
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec![AGREE_FIELD, TEXT_FIELD]);
        assert_eq!(schema.field(AGREE_FIELD).unwrap().kind(), FieldKind::Boolean);
        assert!(schema.field(AGREE_FIELD).unwrap().rules().is_empty());
        let ids: Vec<&str> = schema
            .field(TEXT_FIELD)
            .unwrap()
            .rules()
            .iter()
            .map(|r| r.id())
            .collect();
        assert_eq!(ids, vec!["required", "min_length", "strong_text"]);
    }

    #[test]
    fn test_first_failing_rule_wins() {
        let schema = create_schema(10);
        let result = schema.validate(&text_values(""));
        assert_eq!(result.error(TEXT_FIELD), Some(TEXT_REQUIRED_MESSAGE));

        let result = schema.validate(&text_values("abc"));
        let error = result.field_error(TEXT_FIELD).unwrap();
        assert_eq!(error.rule, "min_length");
        assert_eq!(error.message, "Text must be at least 10 characters long");
    }

    #[test]
    fn test_pattern_floor_applies_below_min_length() {
        let schema = create_schema(2);
        let result = schema.validate(&text_values("A1b"));
        assert_eq!(result.error(TEXT_FIELD), Some(TEXT_PATTERN_MESSAGE));
    }

    #[test]
    fn test_missing_values_use_defaults() {
        let schema = create_schema(5);
        let result = schema.validate(&FormValues::new());
        assert_eq!(result.error(TEXT_FIELD), Some(TEXT_REQUIRED_MESSAGE));
        assert_eq!(result.error(AGREE_FIELD), None);
        assert!(result.contains(AGREE_FIELD));
    }

    #[test]
    fn test_wrong_kind_reports_type_error() {
        let schema = create_schema(5);
        let values = FormValues::new().with(AGREE_FIELD, "yes").with(TEXT_FIELD, "Abcde1");
        let result = schema.validate(&values);
        let error = result.field_error(AGREE_FIELD).unwrap();
        assert_eq!(error.rule, TYPE_RULE_ID);
        assert_eq!(error.message, "Expected boolean, received string");
        assert_eq!(result.error(TEXT_FIELD), None);
    }

    #[test]
    fn test_parse_strips_unknown_and_fills_defaults() {
        let schema = create_schema(5);
        let values = FormValues::new().with(TEXT_FIELD, "Abcde1").with("extra", true);
        let parsed = schema.parse(&values);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get(AGREE_FIELD), Some(&FieldValue::Bool(false)));
        assert!(!parsed.contains("extra"));
    }

    #[test]
    fn test_builder_rejects_duplicates() {
        let err = Schema::builder()
            .field(FieldSchema::text("name"))
            .field(FieldSchema::boolean("name"))
            .build()
            .unwrap_err();
        assert!(matches!(err, FormError::DuplicateField(ref n) if n == "name"));
    }

    #[test]
    fn test_builder_rejects_rule_on_wrong_kind() {
        let err = Schema::builder()
            .field(FieldSchema::boolean("agree").rule(MinLength::new(3)))
            .build()
            .unwrap_err();
        assert!(matches!(err, FormError::RuleKindMismatch { .. }));
    }

    #[test]
    fn test_builder_n_fields() {
        let schema = Schema::builder()
            .field(FieldSchema::text("first").rule(Required::new()))
            .field(FieldSchema::text("second").rule(MinLength::new(2)))
            .field(FieldSchema::boolean("subscribe"))
            .build()
            .unwrap();
        let result = schema.validate(&FormValues::new().with("second", "x"));
        assert_eq!(result.error("first"), Some("Required"));
        assert_eq!(result.error("second"), Some("Must be at least 2 characters long"));
        assert_eq!(result.error_count(), 2);
    }
}
