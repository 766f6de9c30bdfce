//! CLI module for the form renderer
//!
//! Renders a form in the terminal: builds the schema, applies field edits
//! through the controller in the order given, shows each field with its
//! current error, and optionally submits.

pub mod commands;
pub mod output;

pub use commands::{FormArgs, FormCli, FormCommands};
pub use output::{FormReport, OutputFormat, SubmitReport};

use form_contract::FormError;
use thiserror::Error;

/// Errors surfaced by the CLI
#[derive(Error, Debug)]
pub enum CliError {
    /// File could not be read
    #[error("File error: {0}")]
    FileError(String),

    /// Schema, config or field input problem
    #[error(transparent)]
    Form(#[from] FormError),

    /// Output could not be serialized
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CliError {
    /// Map the error onto a process exit code
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CliError::FileError(_) => ExitCode::FileError,
            CliError::Form(e) if e.is_user_error() => ExitCode::InvalidInput,
            CliError::Form(FormError::DuplicateField(_))
            | CliError::Form(FormError::RuleKindMismatch { .. }) => ExitCode::SchemaError,
            _ => ExitCode::InternalError,
        }
    }
}

/// Exit codes for CLI operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Form valid, or submission accepted
    Success = 0,
    /// Form invalid, or submission rejected
    Invalid = 1,
    /// Invalid input or arguments
    InvalidInput = 3,
    /// File not found or inaccessible
    FileError = 4,
    /// Schema definition is inconsistent
    SchemaError = 5,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    pub fn from_validity(valid: bool) -> Self {
        if valid {
            ExitCode::Success
        } else {
            ExitCode::Invalid
        }
    }
}

/// Run the CLI with the given arguments and return the exit code
pub fn run(cli: FormCli) -> Result<ExitCode, CliError> {
    match cli.command {
        FormCommands::Validate { form, format } => commands::execute_validate(&form, format),
        FormCommands::Submit { form, format } => commands::execute_submit(&form, format),
    }
}
