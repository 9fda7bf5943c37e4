//! dpdi-config CLI
//!
//! Tooling for dpdi experiment parameter files.
//!
//! # Usage
//!
//! ```bash
//! # Validate a params file
//! dpdi-config validate params.txt
//!
//! # Validate, rejecting unknown keys
//! dpdi-config validate params.txt --strict
//!
//! # Show the resolved record
//! dpdi-config info params.txt --format yaml
//!
//! # Write a starter params file
//! dpdi-config init params.txt --template binary-mnist
//! ```

use clap::Parser;
use dpdi_config::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
