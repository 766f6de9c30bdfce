//! Terminal renderer for form-contract forms
//!
//! ## CLI Usage
//!
//! ```bash
//! # Show each field and its error after two edits
//! form-demo validate --set agree=true --set text=Abcde1
//!
//! # Submit with a stricter minimum length
//! form-demo submit --min-length 10 --set text=Abcdefghi1 --format json
//!
//! # Use a custom schema definition
//! form-demo validate --schema signup.toml --set handle=someone
//! ```

pub mod cli;

pub use cli::{CliError, ExitCode, FormArgs, FormCli, FormCommands, OutputFormat};

/// Run the CLI application and map failures onto exit codes
pub fn run_cli(cli: FormCli) -> ExitCode {
    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            e.exit_code()
        }
    }
}
