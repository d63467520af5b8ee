//! Error types for configuration loading.

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading or rewriting the workspace
/// configuration document.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Configuration file could not be read or written.
    #[error("I/O {operation} failed: {}", path.display())]
    #[diagnostic(
        code(notepub::config::io),
        help("Check that the configuration file exists and is readable")
    )]
    Io {
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
        /// Path to the configuration file.
        path: PathBuf,
        /// Operation that failed (e.g., "read", "write").
        operation: String,
    },

    /// Configuration document is not valid YAML or does not match the schema.
    #[error("Failed to parse configuration at {}: {message}", path.display())]
    #[diagnostic(
        code(notepub::config::parse),
        help("Check the configuration file for YAML syntax errors")
    )]
    Parse {
        /// Path to the configuration file.
        path: PathBuf,
        /// Description of the parse failure.
        message: String,
    },

    /// Configuration schema version is newer than anything this tool knows.
    #[error("Unsupported configuration schema version {version}")]
    #[diagnostic(
        code(notepub::config::unsupported_version),
        help("Supported schema shapes are the legacy top-level vault list and the nested workspace section (versions up to 5)")
    )]
    UnsupportedVersion {
        /// The declared schema version.
        version: u64,
    },

    /// Neither schema shape carries a vault list.
    #[error("Configuration declares no vaults")]
    #[diagnostic(
        code(notepub::config::missing_vaults),
        help("Declare vaults either at the top level or under the workspace section")
    )]
    MissingVaults,

    /// Configuration could not be serialized back to YAML.
    #[error("Failed to serialize configuration: {message}")]
    #[diagnostic(code(notepub::config::serialize))]
    Serialize {
        /// Description of the serialization failure.
        message: String,
    },
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

    /// Create a parse error.
    #[must_use]
    pub fn parse(path: impl AsRef<Path>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }
}
