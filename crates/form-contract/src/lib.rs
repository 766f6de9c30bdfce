//! Form Contract
//!
//! Field validation and form-submission contract for a small input form: a
//! schema of named fields with ordered rule chains, and a controller that
//! revalidates the whole form on every edit and gates submission on the
//! result.
//!
//! ## Architecture
//!
//! 1. **Values** (`value`): field kinds, field values, and the form value set.
//!
//! 2. **Rules** (`rules`): the [`Rule`] trait and the built-in rules.
//!    A field's rules run in order and the first violation is its error.
//!
//! 3. **Schema** (`schema`, `definition`): immutable field lists built in code,
//!    by [`create_schema`], or from a TOML/JSON/YAML [`SchemaDefinition`].
//!
//! 4. **Validation** (`validation`): per-field errors and the derived
//!    form validity.
//!
//! 5. **Controller** (`controller`): owns the values, publishes validation
//!    results, binds fields by name, and submits to a [`SubmissionSink`].
//!
//! 6. **Config** (`config`): the minimum text length and sink selection.
//!
//! ## Example
//!
//! ```rust
//! use form_contract::{create_schema, FormController, NullSink, SubmitOutcome};
//!
//! let mut form = FormController::with_sink(create_schema(5), NullSink);
//! assert_eq!(form.error("text"), Some("Text is required"));
//!
//! form.register("agree").set(true);
//! form.register("text").set("Abcde1");
//!
//! match form.submit() {
//!     SubmitOutcome::Accepted(payload) => assert_eq!(payload.len(), 2),
//!     SubmitOutcome::Rejected(result) => panic!("unexpected rejection: {}", result),
//! }
//! ```

pub mod config;
pub mod controller;
pub mod definition;
pub mod error;
pub mod rules;
pub mod schema;
pub mod sink;
pub mod validation;
pub mod value;

pub use config::{FormConfig, FormConfigBuilder, DEFAULT_MIN_LENGTH};
pub use controller::{FieldRegistration, FieldView, FormController, SubmitOutcome};
pub use definition::{FieldDefinition, RuleDefinition, SchemaDefinition};
pub use error::{FormError, Result};
pub use rules::{MinLength, Pattern, Required, Rule, StrongText};
pub use schema::{
    create_schema, text_min_length_message, FieldSchema, Schema, SchemaBuilder, AGREE_FIELD,
    TEXT_FIELD, TEXT_PATTERN_MESSAGE, TEXT_REQUIRED_MESSAGE,
};
pub use sink::{log_line, LogSink, NullSink, SubmissionSink};
pub use validation::{FieldError, ValidationResult, TYPE_RULE_ID};
pub use value::{FieldKind, FieldValue, FormValues};

/// Crate version (from Cargo.toml)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
