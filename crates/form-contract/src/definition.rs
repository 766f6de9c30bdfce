//! Declarative schema definitions
//!
//! A [`SchemaDefinition`] describes fields and rule chains as data so a schema
//! can be loaded from TOML, JSON or YAML:
//!
//! ```toml
//! [[fields]]
//! name = "agree"
//! kind = "boolean"
//!
//! [[fields]]
//! name = "text"
//! kind = "string"
//! rules = [
//!     { rule = "required", message = "Text is required" },
//!     { rule = "min_length", min = 5 },
//!     { rule = "pattern", regex = "^[A-Za-z0-9]+$", message = "Letters and digits only" },
//! ]
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{FormError, Result};
use crate::rules::{MinLength, Pattern, Required, Rule, StrongText};
use crate::schema::{
    text_min_length_message, FieldSchema, Schema, AGREE_FIELD, TEXT_FIELD, TEXT_PATTERN_MESSAGE,
    TEXT_REQUIRED_MESSAGE,
};
use crate::value::FieldKind;

/// Data form of a [`Schema`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDefinition {
    pub fields: Vec<FieldDefinition>,
}

/// Data form of a [`FieldSchema`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub name: String,
    pub kind: FieldKind,
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
}

/// Data form of one rule; `message` falls back to the rule's default text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleDefinition {
    Required {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    MinLength {
        min: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    StrongText {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_len: Option<usize>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    Pattern {
        regex: String,
        message: String,
    },
}

impl RuleDefinition {
    fn build(&self, field: &str) -> Result<Arc<dyn Rule>> {
        let rule: Arc<dyn Rule> = match self {
            RuleDefinition::Required { message } => Arc::new(match message {
                Some(m) => Required::with_message(m.as_str()),
                None => Required::new(),
            }),
            RuleDefinition::MinLength { min, message } => Arc::new(match message {
                Some(m) => MinLength::with_message(*min, m.as_str()),
                None => MinLength::new(*min),
            }),
            RuleDefinition::StrongText { min_len, message } => {
                let rule = match message {
                    Some(m) => StrongText::with_message(m.as_str()),
                    None => StrongText::new(),
                };
                Arc::new(rule.min_len(min_len.unwrap_or(StrongText::DEFAULT_MIN_LEN)))
            }
            RuleDefinition::Pattern { regex, message } => {
                let regex = Regex::new(regex).map_err(|source| FormError::InvalidPattern {
                    field: field.to_string(),
                    source,
                })?;
                Arc::new(Pattern::new(regex, message.as_str()))
            }
        };
        Ok(rule)
    }
}

impl SchemaDefinition {
    /// Definition equivalent to [`create_schema`](crate::create_schema)
    pub fn standard(min_length: usize) -> Self {
        Self {
            fields: vec![
                FieldDefinition {
                    name: AGREE_FIELD.to_string(),
                    kind: FieldKind::Boolean,
                    rules: Vec::new(),
                },
                FieldDefinition {
                    name: TEXT_FIELD.to_string(),
                    kind: FieldKind::String,
                    rules: vec![
                        RuleDefinition::Required {
                            message: Some(TEXT_REQUIRED_MESSAGE.to_string()),
                        },
                        RuleDefinition::MinLength {
                            min: min_length,
                            message: Some(text_min_length_message(min_length)),
                        },
                        RuleDefinition::StrongText {
                            min_len: None,
                            message: Some(TEXT_PATTERN_MESSAGE.to_string()),
                        },
                    ],
                },
            ],
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    /// Compile into a [`Schema`]
    pub fn build(&self) -> Result<Schema> {
        let mut builder = Schema::builder();
        for field in &self.fields {
            let mut schema = FieldSchema::new(field.name.clone(), field.kind);
            for rule in &field.rules {
                schema = schema.shared_rule(rule.build(&field.name)?);
            }
            builder = builder.field(schema);
        }
        builder.build()
    }
}

impl Schema {
    pub fn from_definition(definition: &SchemaDefinition) -> Result<Schema> {
        definition.build()
    }
}
