//! Error types for the cache crate

use miette::Diagnostic;
use std::path::Path;
use thiserror::Error;

/// Error type for fingerprinting and cache backend operations
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// I/O error while reading tracked content or moving artifacts
    #[error("I/O {operation} failed{}", path.as_ref().map_or(String::new(), |p| format!(": {}", p.display())))]
    #[diagnostic(
        code(notepub::cache::io),
        help("Check file permissions and ensure the path exists")
    )]
    Io {
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
        /// Path that caused the error, if available
        path: Option<Box<Path>>,
        /// Operation that failed (e.g., "read", "write", "create_dir_all")
        operation: String,
    },

    /// Cache backend fault, distinct from "key absent"
    #[error("Cache backend error: {message}")]
    #[diagnostic(
        code(notepub::cache::backend),
        help("The cache service is degraded; the run will fall back to publishing")
    )]
    Backend {
        /// Description of the backend fault
        message: String,
    },

    /// Configuration or validation error
    #[error("Cache configuration error: {message}")]
    #[diagnostic(code(notepub::cache::config))]
    Configuration {
        /// Error message describing the configuration issue
        message: String,
    },
}

impl Error {
    /// Create an I/O error with path context
    #[must_use]
    pub fn io(
        source: std::io::Error,
        path: impl AsRef<Path>,
        operation: impl Into<String>,
    ) -> Self {
        Self::Io {
            source,
            path: Some(path.as_ref().into()),
            operation: operation.into(),
        }
    }

    /// Create a backend fault error
    #[must_use]
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend {
            message: msg.into(),
        }
    }

    /// Create a configuration error
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration {
            message: msg.into(),
        }
    }
}

/// Result type for cache operations
pub type Result<T> = std::result::Result<T, Error>;
