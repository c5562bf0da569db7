//! Error types for modules-check-deps

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using modules-check-deps Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or rewriting a manifest
#[derive(Debug, Error)]
pub enum Error {
    /// Manifest is missing or unreadable
    #[error("Dependency file not found: {path}: {source}")]
    FileNotFound {
        /// Path that was requested
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Manifest is not valid JSON
    #[error("JSON parse error in {path}: {source}")]
    Parse {
        /// Path of the manifest
        path: PathBuf,
        /// Underlying parser error
        #[source]
        source: serde_json::Error,
    },

    /// Manifest is valid JSON but not a usable manifest
    #[error("Invalid file format for {0}: {1}")]
    InvalidFormat(PathBuf, String),

    /// Backup copy could not be created
    #[error("Failed to back up {path} to {backup}: {source}")]
    Backup {
        /// Manifest being backed up
        path: PathBuf,
        /// Intended backup location
        backup: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Manifest could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Manifest being written
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
