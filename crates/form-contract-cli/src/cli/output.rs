//! Output formatting for the form renderer
//!
//! Renders field state and submission outcomes as JSON, YAML, or a colored
//! table.

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use form_contract::{FieldView, FormController, SubmitOutcome};

use super::CliError;

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format
    Yaml,
}

fn render_serialized<T: Serialize>(value: &T, format: OutputFormat) -> Result<(), CliError> {
    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| CliError::SerializationError(e.to_string()))?,
        _ => serde_yaml::to_string(value)
            .map_err(|e| CliError::SerializationError(e.to_string()))?,
    };
    println!("{}", text);
    Ok(())
}

/// Current state of every field
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormReport {
    pub valid: bool,
    pub error_count: usize,
    pub fields: Vec<FieldView>,
    pub summary: String,
}

impl FormReport {
    pub fn from_controller(controller: &FormController) -> Self {
        let fields = controller.fields();
        let error_count = fields.iter().filter(|f| f.error.is_some()).count();
        let valid = controller.is_valid();
        let summary = if valid {
            "Form is valid".to_string()
        } else {
            format!("Form has {} invalid field(s)", error_count)
        };
        Self {
            valid,
            error_count,
            fields,
            summary,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<(), CliError> {
        match format {
            OutputFormat::Table => {
                self.render_table();
                Ok(())
            }
            _ => render_serialized(self, format),
        }
    }

    fn render_table(&self) {
        let mut stdout = io::stdout();

        writeln!(stdout).ok();
        writeln!(stdout, "{}", "Form".cyan().bold()).ok();
        writeln!(stdout, "{}", "=".repeat(60)).ok();

        for field in &self.fields {
            let marker = if field.error.is_some() {
                "x".red()
            } else {
                "+".green()
            };
            writeln!(
                stdout,
                "{} {} {} = {}",
                marker,
                field.name.bold(),
                format!("({})", field.kind).dimmed(),
                field.value
            )
            .ok();
            if let Some(error) = &field.error {
                writeln!(stdout, "    {}", error.red()).ok();
            }
        }

        writeln!(stdout).ok();
        let summary = if self.valid {
            self.summary.green()
        } else {
            self.summary.red()
        };
        writeln!(stdout, "{}", summary).ok();
        stdout.flush().ok();
    }
}

/// Outcome of a submit command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReport {
    pub accepted: bool,
    pub outcome: SubmitOutcome,
    pub summary: String,
}

impl SubmitReport {
    pub fn from_outcome(outcome: &SubmitOutcome) -> Self {
        let summary = match outcome {
            SubmitOutcome::Accepted(_) => "Submission accepted".to_string(),
            SubmitOutcome::Rejected(result) => {
                format!("Submission rejected: {} invalid field(s)", result.error_count())
            }
        };
        Self {
            accepted: outcome.is_accepted(),
            outcome: outcome.clone(),
            summary,
        }
    }

    pub fn render(&self, format: OutputFormat) -> Result<(), CliError> {
        match format {
            OutputFormat::Table => {
                self.render_table();
                Ok(())
            }
            _ => render_serialized(self, format),
        }
    }

    fn render_table(&self) {
        let mut stdout = io::stdout();

        writeln!(stdout).ok();
        match &self.outcome {
            SubmitOutcome::Accepted(payload) => {
                writeln!(stdout, "{} {}", "+".green(), self.summary.green().bold()).ok();
                writeln!(stdout, "  {} {}", "Form Data:".dimmed(), payload.to_json()).ok();
            }
            SubmitOutcome::Rejected(result) => {
                writeln!(stdout, "{} {}", "x".red(), self.summary.red().bold()).ok();
                for error in result.errors() {
                    writeln!(
                        stdout,
                        "  {} {}",
                        format!("{}:", error.field).cyan(),
                        error.message
                    )
                    .ok();
                }
            }
        }
        stdout.flush().ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use form_contract::{create_schema, NullSink};

    #[test]
    fn test_form_report_counts_errors() {
        let controller = FormController::with_sink(create_schema(5), NullSink);
        let report = FormReport::from_controller(&controller);
        assert!(!report.valid);
        assert_eq!(report.error_count, 1);
        assert_eq!(report.fields.len(), 2);
        assert_eq!(report.summary, "Form has 1 invalid field(s)");
    }

    #[test]
    fn test_submit_report_serializes_outcome() {
        let mut controller = FormController::with_sink(create_schema(5), NullSink);
        controller.set_field("text", "Abcde1");
        let report = SubmitReport::from_outcome(&controller.submit());
        assert!(report.accepted);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcome"]["outcome"], "accepted");
        assert_eq!(json["outcome"]["data"]["text"], "Abcde1");
    }

    #[test]
    fn test_rejected_summary() {
        let mut controller = FormController::with_sink(create_schema(5), NullSink);
        let report = SubmitReport::from_outcome(&controller.submit());
        assert!(!report.accepted);
        assert_eq!(report.summary, "Submission rejected: 1 invalid field(s)");
    }
}
