//! CLI module for stringify-gen
//!
//! This module provides the command-line interface for the generator.
//!
//! ## Commands
//!
//! - `generate <path>` - Generate accessor artifacts for every annotated field
//! - `scan <path>` - List annotated fields and their formatting policies
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

use crate::config::{DEFAULT_ATTRIBUTE, DEFAULT_OUT_DIR};
use crate::version::GENERATOR_VERSION;

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

impl From<crate::pipeline::PipelineError> for CliError {
    fn from(err: crate::pipeline::PipelineError) -> Self {
        CliError::failure(format!("Error: {err}"))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

// ============================================================================
// Clap CLI definition
// ============================================================================

/// Formatted-string accessor generator for Rust structs
#[derive(Parser, Debug)]
#[command(name = "stringify-gen")]
#[command(version = GENERATOR_VERSION)]
#[command(about = "Generate rounded string accessors for #[stringify(..)] fields", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate accessor artifacts
    Generate {
        /// Source file or directory to scan
        #[arg(value_name = "PATH", default_value = "src")]
        path: PathBuf,
        /// Directory artifacts are written to
        #[arg(long, value_name = "DIR", default_value = DEFAULT_OUT_DIR)]
        out_dir: PathBuf,
        /// Crate source root module paths are derived from (default: PATH)
        #[arg(long, value_name = "DIR")]
        crate_root: Option<PathBuf>,
        /// Attribute marking fields for generation
        #[arg(long, value_name = "NAME", default_value = DEFAULT_ATTRIBUTE)]
        attribute: String,
        /// Check that artifacts on disk are up to date without writing
        #[arg(long, conflicts_with = "stdout")]
        check: bool,
        /// Print artifacts to stdout instead of writing them
        #[arg(long)]
        stdout: bool,
        /// Omit the "generated by" header comment
        #[arg(long)]
        no_header: bool,
    },

    /// List annotated fields and their formatting policies
    Scan {
        /// Source file or directory to scan
        #[arg(value_name = "PATH", default_value = "src")]
        path: PathBuf,
        /// Crate source root module paths are derived from (default: PATH)
        #[arg(long, value_name = "DIR")]
        crate_root: Option<PathBuf>,
        /// Attribute marking fields for generation
        #[arg(long, value_name = "NAME", default_value = DEFAULT_ATTRIBUTE)]
        attribute: String,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

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

fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Generate {
            path,
            out_dir,
            crate_root,
            attribute,
            check,
            stdout,
            no_header,
        } => {
            let options = commands::GenerateOptions {
                crate_root,
                mode: if check {
                    commands::OutputMode::Check
                } else if stdout {
                    commands::OutputMode::Stdout
                } else {
                    commands::OutputMode::Write
                },
            };
            let config = crate::config::GeneratorConfig::new()
                .with_attribute_name(attribute)
                .with_out_dir(out_dir)
                .with_header(!no_header);
            commands::generate(&path, config, &options)
        }
        Command::Scan {
            path,
            crate_root,
            attribute,
            json,
        } => {
            let config = crate::config::GeneratorConfig::new().with_attribute_name(attribute);
            commands::scan(&path, crate_root.as_deref(), config, json)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
