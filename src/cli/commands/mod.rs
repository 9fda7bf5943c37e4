//! CLI command implementations

mod completion;
mod info;
mod init;
mod validate;

use crate::cli::core::{Cli, Command};
use crate::cli::LogLevel;

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    // Configure output based on verbose/quiet flags
    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    match cli.command {
        Command::Validate(args) => validate::run_validate(args, log_level),
        Command::Info(args) => info::run_info(args, log_level),
        Command::Init(args) => init::run_init(args, log_level),
        Command::Completion(args) => completion::run_completion(args, log_level),
    }
}
