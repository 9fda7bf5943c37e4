//! CLI argument parsing and command dispatch
//!
//! # Usage
//!
//! ```bash
//! dpdi-config validate params.txt
//! dpdi-config validate params.txt --strict --detailed
//! dpdi-config info params.txt --format yaml
//! dpdi-config init params.txt --template binary-mnist
//! ```

mod commands;
mod core;
mod logging;
mod types;

pub use commands::run_command;
pub use core::{parse_args, Cli, Command, CompletionArgs, InfoArgs, InitArgs, ValidateArgs};
pub use logging::{log, LogLevel};
pub use types::OutputFormat;
