//! Core CLI types - Cli, Command, and argument structs

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::types::OutputFormat;
use crate::params::Template;

/// dpdi-config: experiment parameter tooling for the dpdi training harness
#[derive(Parser, Debug, Clone)]
#[command(name = "dpdi-config")]
#[command(version)]
#[command(about = "Validate, inspect, and scaffold dpdi experiment parameter files")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Validate a parameter file without running anything
    Validate(ValidateArgs),

    /// Display the resolved experiment record
    Info(InfoArgs),

    /// Write a starter parameter file
    Init(InitArgs),

    /// Generate shell completions
    Completion(CompletionArgs),
}

/// Arguments for the validate command
#[derive(Parser, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the parameter file
    #[arg(value_name = "PARAMS")]
    pub params: PathBuf,

    /// Reject unknown keys instead of warning about them
    #[arg(long)]
    pub strict: bool,

    /// Show a detailed summary of the resolved record
    #[arg(short, long)]
    pub detailed: bool,
}

/// Arguments for the info command
#[derive(Parser, Debug, Clone)]
pub struct InfoArgs {
    /// Path to the parameter file
    #[arg(value_name = "PARAMS")]
    pub params: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

/// Arguments for the init command
#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Where to write the parameter file
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Template to use (binary-mnist, full)
    #[arg(short, long, default_value = "binary-mnist")]
    pub template: Template,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the completion command
#[derive(Parser, Debug, Clone)]
pub struct CompletionArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
