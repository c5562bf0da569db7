//! Error types for modules-check-registry

use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias for registry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while looking up a package's latest version
#[derive(Error, Debug)]
pub enum Error {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid package name format
    #[error("Invalid package name: {0}")]
    InvalidPackageName(String),

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Package not found in registry
    #[error("Package '{0}' not found in {1} registry")]
    PackageNotFound(String, String),

    /// The lookup command could not be started
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program that was executed
        program: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The lookup command exited unsuccessfully
    #[error("Version lookup for '{package}' failed ({status}): {stderr}")]
    CommandFailed {
        /// Package being looked up
        package: String,
        /// Exit status of the command
        status: ExitStatus,
        /// Trimmed standard error output
        stderr: String,
    },

    /// The registry answered but reported no version
    #[error("Registry returned no version for '{0}'")]
    EmptyVersion(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new generic error
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
