//! CLI command definitions for the form renderer

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use form_contract::{
    FieldKind, FieldValue, FormConfig, FormController, FormError, Schema, SchemaDefinition,
};

use super::output::{FormReport, OutputFormat, SubmitReport};
use super::{CliError, ExitCode};

/// Form renderer CLI
///
/// Fill in the form from the command line and see each field's validation
/// state, or submit it.
#[derive(Parser, Debug)]
#[command(name = "form-demo")]
#[command(about = "Render, validate and submit a form from the terminal", long_about = None)]
#[command(version)]
pub struct FormCli {
    /// Output verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: FormCommands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum FormCommands {
    /// Apply edits and show every field with its current error
    Validate {
        #[command(flatten)]
        form: FormArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Apply edits and submit the form
    Submit {
        #[command(flatten)]
        form: FormArgs,

        /// Output format
        #[arg(long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

/// How to build the form and which edits to apply
#[derive(Args, Debug, Clone, Default)]
pub struct FormArgs {
    /// Form configuration file (TOML, JSON or YAML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Schema definition file; replaces the standard two-field form
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Minimum text length, overriding the configuration
    #[arg(long)]
    pub min_length: Option<usize>,

    /// Field edit as NAME=VALUE, applied in the order given
    #[arg(long = "set", value_name = "NAME=VALUE")]
    pub edits: Vec<String>,
}

/// Execute the validate command
pub fn execute_validate(form: &FormArgs, format: OutputFormat) -> Result<ExitCode, CliError> {
    let controller = build_controller(form)?;
    let report = FormReport::from_controller(&controller);
    report.render(format)?;
    Ok(ExitCode::from_validity(report.valid))
}

/// Execute the submit command
pub fn execute_submit(form: &FormArgs, format: OutputFormat) -> Result<ExitCode, CliError> {
    let mut controller = build_controller(form)?;
    let outcome = controller.submit();
    let report = SubmitReport::from_outcome(&outcome);
    report.render(format)?;
    Ok(ExitCode::from_validity(outcome.is_accepted()))
}

/// Build a controller from the arguments and apply every edit
pub fn build_controller(form: &FormArgs) -> Result<FormController, CliError> {
    let mut config = match &form.config {
        Some(path) => load_config(path)?,
        None => FormConfig::default(),
    };
    if let Some(min_length) = form.min_length {
        config.min_length = min_length;
    }

    let schema = match &form.schema {
        Some(path) => load_schema(path)?,
        None => config.schema(),
    };
    tracing::debug!(
        fields = schema.fields().len(),
        min_length = config.min_length,
        "Schema ready"
    );

    let mut controller = FormController::with_boxed_sink(Arc::new(schema), config.sink());
    for edit in &form.edits {
        let (name, value) = parse_edit(controller.schema(), edit)?;
        controller.register(&name).set(value);
    }
    Ok(controller)
}

/// Parse `NAME=VALUE` against the field's declared kind.
///
/// Names the schema does not declare are taken as text.
pub fn parse_edit(schema: &Schema, edit: &str) -> Result<(String, FieldValue), CliError> {
    let (name, raw) = edit.split_once('=').ok_or_else(|| {
        FormError::invalid_input(format!("expected NAME=VALUE, got '{}'", edit))
    })?;
    let name = name.trim();
    if name.is_empty() {
        return Err(FormError::invalid_input(format!("missing field name in '{}'", edit)).into());
    }

    let kind = schema
        .field(name)
        .map(|f| f.kind())
        .unwrap_or(FieldKind::String);
    let value = kind.parse(raw).map_err(|e| {
        FormError::invalid_input(format!("field '{}': {}", name, e))
    })?;
    Ok((name.to_string(), value))
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|e| {
        CliError::FileError(format!("Failed to read '{}': {}", path.display(), e))
    })
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

/// Load a form configuration, choosing the format by file extension
pub fn load_config(path: &Path) -> Result<FormConfig, CliError> {
    let content = read_file(path)?;
    let config = match extension(path).as_str() {
        "json" => FormConfig::from_json_str(&content)?,
        "yaml" | "yml" => FormConfig::from_yaml_str(&content)?,
        _ => FormConfig::from_toml_str(&content)?,
    };
    Ok(config)
}

/// Load and compile a schema definition, choosing the format by file extension
pub fn load_schema(path: &Path) -> Result<Schema, CliError> {
    let content = read_file(path)?;
    let definition = match extension(path).as_str() {
        "json" => SchemaDefinition::from_json_str(&content)?,
        "yaml" | "yml" => SchemaDefinition::from_yaml_str(&content)?,
        _ => SchemaDefinition::from_toml_str(&content)?,
    };
    Ok(Schema::from_definition(&definition)?)
}
