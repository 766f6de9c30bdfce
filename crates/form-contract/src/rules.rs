//! Rule framework for field validation
//!
//! A field carries an ordered chain of rules. The chain is evaluated in
//! declaration order and stops at the first rule that reports a violation;
//! that rule's message becomes the field's error.

use regex::Regex;
use std::fmt;

use crate::value::{FieldKind, FieldValue};

/// Characters that end a line of input; single-line rules reject them.
const LINE_TERMINATORS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

/// Trait for implementing field validation rules
///
/// Rules are pure: the same value always produces the same outcome, and
/// evaluating a rule never changes any state.
pub trait Rule: Send + Sync + fmt::Debug {
    /// Stable identifier for this rule (e.g. `min_length`)
    fn id(&self) -> &str;

    /// Whether this rule can check values of the given kind
    fn applies_to(&self, kind: FieldKind) -> bool;

    /// Check a value, returning the failure message when it is violated
    fn violation(&self, value: &FieldValue) -> Option<String>;
}

/// Length in UTF-16 code units, the unit browser inputs report
fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

fn text_len(value: &FieldValue) -> Option<usize> {
    value.as_text().map(utf16_len)
}

/// Text must be non-empty
#[derive(Debug, Clone)]
pub struct Required {
    message: String,
}

impl Required {
    pub fn new() -> Self {
        Self {
            message: "Required".to_string(),
        }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for Required {
    fn id(&self) -> &str {
        "required"
    }

    fn applies_to(&self, kind: FieldKind) -> bool {
        kind == FieldKind::String
    }

    fn violation(&self, value: &FieldValue) -> Option<String> {
        match text_len(value) {
            Some(0) => Some(self.message.clone()),
            _ => None,
        }
    }
}

/// Text must have at least `min` UTF-16 code units
#[derive(Debug, Clone)]
pub struct MinLength {
    min: usize,
    message: String,
}

impl MinLength {
    /// Create a rule whose message names the configured bound
    pub fn new(min: usize) -> Self {
        Self {
            min,
            message: format!("Must be at least {} characters long", min),
        }
    }

    pub fn with_message(min: usize, message: impl Into<String>) -> Self {
        Self {
            min,
            message: message.into(),
        }
    }
}

impl Rule for MinLength {
    fn id(&self) -> &str {
        "min_length"
    }

    fn applies_to(&self, kind: FieldKind) -> bool {
        kind == FieldKind::String
    }

    fn violation(&self, value: &FieldValue) -> Option<String> {
        match text_len(value) {
            Some(len) if len < self.min => Some(self.message.clone()),
            _ => None,
        }
    }
}

/// Single-line text containing an ASCII uppercase letter and an ASCII digit,
/// with at least `min_len` UTF-16 code units overall.
///
/// The length floor here is separate from [`MinLength`]; a schema that carries
/// both keeps both checks.
#[derive(Debug, Clone)]
pub struct StrongText {
    min_len: usize,
    message: String,
}

impl StrongText {
    pub const DEFAULT_MIN_LEN: usize = 5;

    pub fn new() -> Self {
        Self::with_message("Must include at least one uppercase letter and one number")
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            min_len: Self::DEFAULT_MIN_LEN,
            message: message.into(),
        }
    }

    pub fn min_len(mut self, min_len: usize) -> Self {
        self.min_len = min_len;
        self
    }

    fn is_strong(s: &str) -> bool {
        !s.contains(LINE_TERMINATORS)
            && s.chars().any(|c| c.is_ascii_uppercase())
            && s.chars().any(|c| c.is_ascii_digit())
    }
}

impl Default for StrongText {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for StrongText {
    fn id(&self) -> &str {
        "strong_text"
    }

    fn applies_to(&self, kind: FieldKind) -> bool {
        kind == FieldKind::String
    }

    fn violation(&self, value: &FieldValue) -> Option<String> {
        let s = value.as_text()?;
        let long_enough = utf16_len(s) >= self.min_len;
        if long_enough && Self::is_strong(s) {
            None
        } else {
            Some(self.message.clone())
        }
    }
}

/// Text must match a regular expression
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
    message: String,
}

impl Pattern {
    pub fn new(regex: Regex, message: impl Into<String>) -> Self {
        Self {
            regex,
            message: message.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl Rule for Pattern {
    fn id(&self) -> &str {
        "pattern"
    }

    fn applies_to(&self, kind: FieldKind) -> bool {
        kind == FieldKind::String
    }

    fn violation(&self, value: &FieldValue) -> Option<String> {
        let s = value.as_text()?;
        if self.regex.is_match(s) {
            None
        } else {
            Some(self.message.clone())
        }
    }
}
