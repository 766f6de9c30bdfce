//! Submission sinks
//!
//! A sink receives the payload of an accepted submission. The payload is an
//! owned snapshot, so a sink may hold on to it or hand it to asynchronous
//! work without observing later edits to the form.

use crate::value::FormValues;

/// Consumer of accepted submissions
pub trait SubmissionSink: Send + Sync {
    fn accept(&self, payload: FormValues);
}

/// Line logged by [`LogSink`] for one payload
pub fn log_line(payload: &FormValues) -> String {
    format!("Form Data: {}", payload.to_json())
}

/// Logs each payload as `Form Data: <json>` at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl SubmissionSink for LogSink {
    fn accept(&self, payload: FormValues) {
        tracing::info!(fields = payload.len(), "{}", log_line(&payload));
    }
}

/// Discards every payload
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl SubmissionSink for NullSink {
    fn accept(&self, _payload: FormValues) {}
}

impl<F> SubmissionSink for F
where
    F: Fn(FormValues) + Send + Sync,
{
    fn accept(&self, payload: FormValues) {
        self(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_closure_sink_receives_payload() {
        let received = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&received);
        let sink = move |payload: FormValues| captured.lock().unwrap().push(payload);

        sink.accept(FormValues::new().with("text", "Abcde1"));

        let received = received.lock().unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].to_json(), r#"{"text":"Abcde1"}"#);
    }

    #[test]
    fn test_log_line_format() {
        let payload = FormValues::new().with("agree", true).with("text", "Abcde1");
        assert_eq!(
            log_line(&payload),
            r#"Form Data: {"agree":true,"text":"Abcde1"}"#
        );
        assert_eq!(log_line(&FormValues::new()), "Form Data: {}");
    }
}
