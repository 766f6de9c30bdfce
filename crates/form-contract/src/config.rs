//! Form configuration
//!
//! Every field is optional in serialized form; missing values take the
//! defaults below.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schema::{create_schema, Schema};
use crate::sink::{LogSink, NullSink, SubmissionSink};

/// Minimum text length used when none is configured
pub const DEFAULT_MIN_LENGTH: usize = 5;

/// Settings for the standard form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Minimum number of characters for the text field
    pub min_length: usize,

    /// Log accepted submissions through [`LogSink`]
    pub log_submissions: bool,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            log_submissions: true,
        }
    }
}

impl FormConfig {
    pub fn builder() -> FormConfigBuilder {
        FormConfigBuilder::new()
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

    /// Schema described by this configuration
    pub fn schema(&self) -> Schema {
        create_schema(self.min_length)
    }

    /// Sink described by this configuration
    pub fn sink(&self) -> Box<dyn SubmissionSink> {
        if self.log_submissions {
            Box::new(LogSink)
        } else {
            Box::new(NullSink)
        }
    }
}

/// Builder for [`FormConfig`]
#[derive(Debug, Default)]
pub struct FormConfigBuilder {
    config: FormConfig,
}

impl FormConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_length(mut self, min_length: usize) -> Self {
        self.config.min_length = min_length;
        self
    }

    pub fn log_submissions(mut self, enabled: bool) -> Self {
        self.config.log_submissions = enabled;
        self
    }

    pub fn build(self) -> FormConfig {
        self.config
    }
}
