//! CLI module for the Quipu compiler
//!
//! This module provides the command-line interface for the compiler.
//!
//! ## Commands
//!
//! - `check <schema>` - Parse and validate a schema file
//! - `gen <schema>` - Generate Vala sources from a schema file
//!
//! ## Modules
//!
//! - `commands` - Command implementations
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    /// Create a new CLI error with a message and exit code.
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The Quipu schema compiler
#[derive(Parser, Debug)]
#[command(name = "quipu")]
#[command(version = VERSION)]
#[command(about = "Generates Vala sources from Quipu schema files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse and validate a schema file
    Check {
        /// Schema JSON file
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,
    },

    /// Generate Vala sources from a schema file
    Gen {
        /// Schema JSON file
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Output directory
        #[arg(
            short = 'o',
            long = "out-dir",
            value_name = "DIR",
            default_value = "gen-vala"
        )]
        out_dir: PathBuf,

        /// Backend option, `name` or `name=value` (repeatable)
        #[arg(long = "option", value_name = "NAME")]
        options: Vec<String>,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Check { schema } => commands::check_schema(&schema),
        Command::Gen {
            schema,
            out_dir,
            options,
        } => commands::generate(&schema, &out_dir, &options),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::try_parse_from(["quipu", "check", "api.json"]).unwrap();
        assert!(matches!(cli.command, Command::Check { .. }));
    }

    #[test]
    fn test_cli_parse_gen_defaults() {
        let cli = Cli::try_parse_from(["quipu", "gen", "api.json"]).unwrap();
        if let Command::Gen {
            out_dir, options, ..
        } = cli.command
        {
            assert_eq!(out_dir, PathBuf::from("gen-vala"));
            assert!(options.is_empty());
        } else {
            panic!("Expected Gen command");
        }
    }

    #[test]
    fn test_cli_parse_gen_with_options() {
        let cli = Cli::try_parse_from([
            "quipu",
            "gen",
            "api.json",
            "--out-dir",
            "out",
            "--option",
            "libgee",
            "--option",
            "pascal",
        ])
        .unwrap();
        if let Command::Gen {
            out_dir, options, ..
        } = cli.command
        {
            assert_eq!(out_dir, PathBuf::from("out"));
            assert_eq!(options, vec!["libgee".to_string(), "pascal".to_string()]);
        } else {
            panic!("Expected Gen command");
        }
    }

    #[test]
    fn test_cli_requires_a_subcommand() {
        assert!(Cli::try_parse_from(["quipu"]).is_err());
    }
}
