//! form-demo
//!
//! # Exit Codes
//!
//! - 0: Form valid / submission accepted
//! - 1: Form invalid / submission rejected
//! - 3: Invalid input or arguments
//! - 4: File not found or inaccessible
//! - 5: Schema definition is inconsistent
//! - 10: Internal error

use clap::Parser;
use form_contract_cli::{run_cli, FormCli};

fn main() {
    let cli = FormCli::parse();

    let level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
