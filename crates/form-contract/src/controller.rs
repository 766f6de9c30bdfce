//! Form controller
//!
//! [`FormController`] owns the current [`FormValues`] for one form instance.
//! Every edit re-runs [`Schema::validate`] over the whole value set, so the
//! published [`ValidationResult`] always matches the values it was computed
//! from. Submission is gated on that result.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::config::FormConfig;
use crate::schema::Schema;
use crate::sink::{LogSink, SubmissionSink};
use crate::validation::ValidationResult;
use crate::value::{FieldKind, FieldValue, FormValues};

/// Outcome of [`FormController::submit`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "data", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// The form validated; carries the payload handed to the sink
    Accepted(FormValues),
    /// The form failed validation; nothing was handed off
    Rejected(ValidationResult),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }

    pub fn payload(&self) -> Option<&FormValues> {
        match self {
            SubmitOutcome::Accepted(values) => Some(values),
            SubmitOutcome::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&ValidationResult> {
        match self {
            SubmitOutcome::Accepted(_) => None,
            SubmitOutcome::Rejected(result) => Some(result),
        }
    }
}

/// Snapshot of one declared field for a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldView {
    pub name: String,
    pub kind: FieldKind,
    pub value: FieldValue,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Binding between one named field and its controller.
///
/// Obtained from [`FormController::register`] with the name of the field being
/// rendered; reads and writes always go to that name.
pub struct FieldRegistration<'a> {
    controller: &'a mut FormController,
    name: String,
}

impl FieldRegistration<'_> {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared kind, or `None` if the schema has no such field
    pub fn kind(&self) -> Option<FieldKind> {
        self.controller.schema.field(&self.name).map(|f| f.kind())
    }

    pub fn value(&self) -> Option<&FieldValue> {
        self.controller.value(&self.name)
    }

    pub fn error(&self) -> Option<&str> {
        self.controller.error(&self.name)
    }

    /// Change handler for the bound input
    pub fn set(&mut self, value: impl Into<FieldValue>) -> &ValidationResult {
        self.controller.set_field(&self.name, value)
    }
}

/// Holds field values, revalidates on change, and gates submission
pub struct FormController {
    schema: Arc<Schema>,
    values: FormValues,
    result: ValidationResult,
    sink: Box<dyn SubmissionSink>,
    submit_count: u32,
}

impl FormController {
    /// Create a controller that logs accepted submissions
    pub fn new(schema: impl Into<Arc<Schema>>) -> Self {
        Self::with_sink(schema, LogSink)
    }

    /// Create a controller handing accepted submissions to `sink`
    pub fn with_sink(schema: impl Into<Arc<Schema>>, sink: impl SubmissionSink + 'static) -> Self {
        Self::with_boxed_sink(schema.into(), Box::new(sink))
    }

    /// Create a controller for the standard form described by `config`
    pub fn from_config(config: &FormConfig) -> Self {
        Self::with_boxed_sink(Arc::new(config.schema()), config.sink())
    }

    /// Create a controller from an already boxed sink
    pub fn with_boxed_sink(schema: Arc<Schema>, sink: Box<dyn SubmissionSink>) -> Self {
        let values = schema.defaults();
        let result = schema.validate(&values);
        Self {
            schema,
            values,
            result,
            sink,
            submit_count: 0,
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Result of the most recent validation
    pub fn result(&self) -> &ValidationResult {
        &self.result
    }

    pub fn error(&self, name: &str) -> Option<&str> {
        self.result.error(name)
    }

    pub fn is_valid(&self) -> bool {
        self.result.is_valid()
    }

    /// Number of submit attempts, accepted or not
    pub fn submit_count(&self) -> u32 {
        self.submit_count
    }

    /// Record a value and revalidate the whole form
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) -> &ValidationResult {
        if !self.schema.declares(name) {
            tracing::warn!(field = name, "Value set for undeclared field; it will not be validated or submitted");
        }
        self.values.insert(name, value);
        self.revalidate();
        &self.result
    }

    /// Bind the field called `name`
    pub fn register(&mut self, name: &str) -> FieldRegistration<'_> {
        FieldRegistration {
            controller: self,
            name: name.to_string(),
        }
    }

    /// Fresh view of every declared field, in declaration order
    pub fn fields(&self) -> Vec<FieldView> {
        self.schema
            .fields()
            .iter()
            .map(|field| FieldView {
                name: field.name().to_string(),
                kind: field.kind(),
                value: self
                    .values
                    .get(field.name())
                    .cloned()
                    .unwrap_or_else(|| field.default_value()),
                error: self.result.error(field.name()).map(str::to_string),
            })
            .collect()
    }

    /// Validate and, if valid, hand a snapshot of the values to the sink.
    ///
    /// After an accepted submission the values are reset to their defaults.
    pub fn submit(&mut self) -> SubmitOutcome {
        self.submit_count = self.submit_count.saturating_add(1);
        self.revalidate();

        if !self.result.is_valid() {
            tracing::debug!(
                errors = self.result.error_count(),
                attempt = self.submit_count,
                "Submission rejected"
            );
            return SubmitOutcome::Rejected(self.result.clone());
        }

        let payload = self.schema.parse(&self.values);
        self.sink.accept(payload.clone());
        tracing::info!(attempt = self.submit_count, "Submission accepted");
        self.reset();
        SubmitOutcome::Accepted(payload)
    }

    /// Restore every field to its default and revalidate
    pub fn reset(&mut self) {
        self.values = self.schema.defaults();
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.result = self.schema.validate(&self.values);
        tracing::debug!(
            valid = self.result.is_valid(),
            errors = self.result.error_count(),
            "Form revalidated"
        );
    }
}

impl std::fmt::Debug for FormController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormController")
            .field("schema", &self.schema)
            .field("values", &self.values)
            .field("result", &self.result)
            .field("submit_count", &self.submit_count)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{create_schema, AGREE_FIELD, TEXT_FIELD, TEXT_REQUIRED_MESSAGE};
    use std::sync::Mutex;

    fn recording_controller(min_length: usize) -> (FormController, Arc<Mutex<Vec<FormValues>>>) {
        let received = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&received);
        let controller = FormController::with_sink(create_schema(min_length), move |p: FormValues| {
            captured.lock().unwrap().push(p)
        });
        (controller, received)
    }

    #[test]
    fn test_new_controller_starts_with_defaults_and_errors() {
        let (controller, _) = recording_controller(5);
        assert_eq!(controller.value(AGREE_FIELD), Some(&FieldValue::Bool(false)));
        assert_eq!(controller.value(TEXT_FIELD), Some(&FieldValue::Text(String::new())));
        assert_eq!(controller.error(TEXT_FIELD), Some(TEXT_REQUIRED_MESSAGE));
        assert_eq!(controller.error(AGREE_FIELD), None);
        assert!(!controller.is_valid());
    }

    #[test]
    fn test_set_field_revalidates() {
        let (mut controller, _) = recording_controller(5);
        assert!(controller.set_field(TEXT_FIELD, "Abcde1").is_valid());
        assert!(controller.is_valid());
        assert!(!controller.set_field(TEXT_FIELD, "").is_valid());
    }

    #[test]
    fn test_accepted_submission_snapshots_and_resets() {
        let (mut controller, received) = recording_controller(5);
        controller.set_field(AGREE_FIELD, true);
        controller.set_field(TEXT_FIELD, "Abcde1");

        let outcome = controller.submit();
        let expected = FormValues::new().with(AGREE_FIELD, true).with(TEXT_FIELD, "Abcde1");
        assert_eq!(outcome, SubmitOutcome::Accepted(expected.clone()));
        assert_eq!(received.lock().unwrap().as_slice(), &[expected.clone()]);

        // Later edits never reach the payload already handed off.
        controller.set_field(TEXT_FIELD, "Changed9");
        assert_eq!(outcome.payload(), Some(&expected));
        assert_eq!(received.lock().unwrap()[0], expected);
    }

    #[test]
    fn test_accepted_submission_resets_values() {
        let (mut controller, _) = recording_controller(5);
        controller.set_field(TEXT_FIELD, "Abcde1");
        assert!(controller.submit().is_accepted());
        assert_eq!(controller.value(TEXT_FIELD), Some(&FieldValue::Text(String::new())));
        assert_eq!(controller.error(TEXT_FIELD), Some(TEXT_REQUIRED_MESSAGE));
        assert_eq!(controller.submit_count(), 1);
    }

    #[test]
    fn test_rejected_submission_keeps_values_and_skips_sink() {
        let (mut controller, received) = recording_controller(5);
        controller.set_field(TEXT_FIELD, "abc");
        let outcome = controller.submit();
        assert!(!outcome.is_accepted());
        assert!(outcome.rejection().unwrap().error(TEXT_FIELD).is_some());
        assert!(received.lock().unwrap().is_empty());
        assert_eq!(controller.value(TEXT_FIELD), Some(&FieldValue::from("abc")));
        assert_eq!(controller.submit_count(), 1);
    }

    #[test]
    fn test_submit_count_saturates() {
        let (mut controller, _) = recording_controller(5);
        controller.submit_count = u32::MAX;
        assert!(!controller.submit().is_accepted());
        assert_eq!(controller.submit_count(), u32::MAX);
    }

    #[test]
    fn test_undeclared_field_is_held_but_not_submitted() {
        let (mut controller, received) = recording_controller(5);
        controller.set_field("nickname", "someone");
        controller.set_field(TEXT_FIELD, "Abcde1");
        assert_eq!(controller.value("nickname"), Some(&FieldValue::from("someone")));
        assert!(!controller.result().contains("nickname"));

        let outcome = controller.submit();
        assert!(!outcome.payload().unwrap().contains("nickname"));
        assert!(!received.lock().unwrap()[0].contains("nickname"));
    }

    #[test]
    fn test_registration_binds_by_name() {
        let (mut controller, _) = recording_controller(5);
        {
            let mut agree = controller.register(AGREE_FIELD);
            assert_eq!(agree.kind(), Some(FieldKind::Boolean));
            agree.set(true);
            assert_eq!(agree.value(), Some(&FieldValue::Bool(true)));
            assert_eq!(agree.error(), None);
        }
        {
            let mut text = controller.register(TEXT_FIELD);
            assert_eq!(text.name(), TEXT_FIELD);
            text.set("abc");
            assert!(text.error().is_some());
        }
        assert_eq!(controller.value(AGREE_FIELD), Some(&FieldValue::Bool(true)));
        assert_eq!(controller.value(TEXT_FIELD), Some(&FieldValue::from("abc")));
    }

    #[test]
    fn test_fields_views() {
        let (mut controller, _) = recording_controller(5);
        controller.set_field(AGREE_FIELD, true);
        let views = controller.fields();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].name, AGREE_FIELD);
        assert_eq!(views[0].value, FieldValue::Bool(true));
        assert_eq!(views[0].error, None);
        assert_eq!(views[1].name, TEXT_FIELD);
        assert_eq!(views[1].error.as_deref(), Some(TEXT_REQUIRED_MESSAGE));
    }

    #[test]
    fn test_reset() {
        let (mut controller, _) = recording_controller(5);
        controller.set_field(AGREE_FIELD, true);
        controller.set_field(TEXT_FIELD, "Abcde1");
        controller.reset();
        assert_eq!(controller.values(), &controller.schema().defaults());
        assert!(!controller.is_valid());
    }

    #[test]
    fn test_from_config() {
        let config = FormConfig::builder().min_length(8).log_submissions(false).build();
        let mut controller = FormController::from_config(&config);
        controller.set_field(TEXT_FIELD, "Abcde1");
        assert_eq!(
            controller.error(TEXT_FIELD),
            Some("Text must be at least 8 characters long")
        );
    }

    #[test]
    fn test_outcome_serializes_with_tag() {
        let outcome = SubmitOutcome::Accepted(FormValues::new().with(AGREE_FIELD, false));
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "accepted");
        assert_eq!(json["data"]["agree"], false);
    }
}
