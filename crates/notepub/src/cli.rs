//! Command-line interface definition and error/exit-code mapping.

use crate::tracing::{LogLevel, TracingFormat};
use clap::Parser;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Success exit code.
pub const EXIT_OK: i32 = 0;
/// Configuration error exit code.
pub const EXIT_CONFIG: i32 = 2;
/// Any other fatal error exit code.
pub const EXIT_FAILURE: i32 = 1;

/// Cache-aware documentation publish runner.
///
/// Fingerprints all tracked vault content, and skips the external publish
/// pipeline when an artifact set for that fingerprint is already cached.
#[derive(Parser, Debug)]
#[command(name = "notepub")]
#[command(about = "Publish a multi-vault documentation workspace, skipping when content is unchanged")]
#[command(version)]
pub struct Cli {
    /// Path to the workspace configuration document.
    #[arg(long, value_name = "PATH", default_value = "dendron.yml")]
    pub config: PathBuf,

    /// Shell-style command line for invoking the external publish CLI.
    #[arg(long = "cli-command", value_name = "COMMAND", default_value = "npx dendron")]
    pub cli_command: String,

    /// Exclude vaults marked private from fingerprinting and publishing.
    #[arg(long)]
    pub ignore_private: bool,

    /// Workspace root directory (defaults to the current directory).
    #[arg(long, value_name = "DIR")]
    pub workspace_root: Option<PathBuf>,

    /// Artifact-store working copy, relative to the workspace root.
    #[arg(long, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    /// Local cache root override.
    #[arg(long, value_name = "DIR", env = "NOTEPUB_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Logging verbosity level.
    #[arg(short = 'L', long, global = true, default_value = "info", value_enum)]
    pub level: LogLevel,

    /// Logging output format.
    #[arg(long, global = true, default_value = "compact", value_enum)]
    pub format: TracingFormat,
}

/// Fatal CLI errors with exit-code mapping.
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// Configuration problem (exit code 2).
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] notepub_config::Error),

    /// Fingerprinting or cache setup problem (exit code 1).
    #[error(transparent)]
    #[diagnostic(transparent)]
    Cache(#[from] notepub_cache::Error),

    /// Publish pipeline failure (exit code 1).
    #[error(transparent)]
    #[diagnostic(transparent)]
    Publish(#[from] notepub_publish::Error),

    /// Failure to emit the `was-published` output (exit code 1).
    #[error("Failed to write output: {message}")]
    #[diagnostic(code(notepub::cli::output))]
    Output {
        /// Description of the output failure.
        message: String,
    },
}

/// Map an error to its process exit code.
#[must_use]
pub fn exit_code_for(error: &CliError) -> i32 {
    match error {
        CliError::Config(_) | CliError::Publish(notepub_publish::Error::Config(_)) => EXIT_CONFIG,
        _ => EXIT_FAILURE,
    }
}

/// Render a fatal error to stderr through miette.
#[allow(clippy::print_stderr)]
pub fn render_error(error: CliError) {
    let report = miette::Report::new(error);
    // The report, not tracing: fatal errors must reach the user even when
    // logging is filtered down.
    eprintln!("{report:?}");
}

/// Parse command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
