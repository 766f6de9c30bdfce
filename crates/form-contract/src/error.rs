//! Error types for form-contract
//!
//! Field validation failures are not errors: they are reported as values in
//! [`ValidationResult`](crate::ValidationResult). The types here cover problems
//! building a schema or loading configuration.

use thiserror::Error;

/// Main error type for schema and configuration operations
#[derive(Error, Debug)]
pub enum FormError {
    /// A field name was declared more than once
    #[error("Duplicate field: {0}")]
    DuplicateField(String),

    /// A rule was attached to a field whose kind it cannot check
    #[error("Rule '{rule}' does not apply to {kind} field '{field}'")]
    RuleKindMismatch {
        rule: String,
        field: String,
        kind: String,
    },

    /// A pattern rule carried a regex that failed to compile
    #[error("Invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// Configuration or schema definition parsing error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Invalid input data or arguments
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl FormError {
    /// Create a parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        FormError::ParseError(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        FormError::InvalidInput(msg.into())
    }

    /// Check if this error was caused by user-supplied input
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            FormError::ParseError(_) | FormError::InvalidInput(_) | FormError::InvalidPattern { .. }
        )
    }
}

impl From<serde_json::Error> for FormError {
    fn from(err: serde_json::Error) -> Self {
        FormError::parse_error(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for FormError {
    fn from(err: serde_yaml::Error) -> Self {
        FormError::parse_error(format!("YAML error: {}", err))
    }
}

impl From<toml::de::Error> for FormError {
    fn from(err: toml::de::Error) -> Self {
        FormError::parse_error(format!("TOML error: {}", err))
    }
}

/// Result type alias for form-contract operations
pub type Result<T> = std::result::Result<T, FormError>;
