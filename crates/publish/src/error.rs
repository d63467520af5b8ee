//! Error types for publish orchestration.

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for publish operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while running the publish pipeline.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// The configured CLI command string could not be tokenized.
    #[error("Failed to parse CLI command: {command:?}")]
    #[diagnostic(
        code(notepub::publish::command_parse),
        help("Check quoting in the configured publish CLI command")
    )]
    CommandParse {
        /// The command string as configured.
        command: String,
    },

    /// An external process could not be spawned.
    #[error("Failed to spawn {program}")]
    #[diagnostic(
        code(notepub::publish::spawn),
        help("Check that the publish CLI is installed and on PATH")
    )]
    Spawn {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Program that could not be started.
        program: String,
    },

    /// An external process exited non-zero. Fatal; no step is retried.
    #[error("{program} exited with status {status}: {stderr}")]
    #[diagnostic(code(notepub::publish::process_failed))]
    ProcessFailed {
        /// Program that failed.
        program: String,
        /// Exit status code (-1 when terminated by signal).
        status: i32,
        /// Captured standard error of the failed process.
        stderr: String,
    },

    /// Filesystem error during orchestration (e.g., build-cache purge).
    #[error("I/O {operation} failed: {}", path.display())]
    #[diagnostic(code(notepub::publish::io))]
    Io {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Path the operation targeted.
        path: PathBuf,
        /// Operation that failed.
        operation: String,
    },

    /// Workspace configuration error surfaced through the pipeline.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] notepub_config::Error),

    /// Fingerprinting error surfaced through the pipeline.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Cache(#[from] notepub_cache::Error),
}

impl Error {
    /// Create an I/O error with path context.
    #[must_use]
    pub fn io(source: std::io::Error, path: impl AsRef<Path>, operation: impl Into<String>) -> Self {
        Self::Io {
            source,
            path: path.as_ref().to_path_buf(),
            operation: operation.into(),
        }
    }
}
