//! Completion command implementation

use clap::CommandFactory;
use clap_complete::generate;

use crate::cli::core::{Cli, CompletionArgs};
use crate::cli::LogLevel;

pub fn run_completion(args: CompletionArgs, _level: LogLevel) -> Result<(), String> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(args.shell, &mut cmd, name, &mut std::io::stdout());
    Ok(())
}
