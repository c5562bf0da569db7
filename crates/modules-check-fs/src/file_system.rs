//! FileSystem trait for project-scoped filesystem operations.

use std::io;
use std::path::Path;

/// Filesystem abstraction scoped to a project root.
///
/// All methods are async; the native implementation offloads blocking
/// `std::fs` calls to the tokio blocking pool.
///
/// Errors are plain `std::io::Error`s. Paths that resolve outside the project
/// root fail with `io::ErrorKind::PermissionDenied`.
#[async_trait::async_trait]
pub trait FileSystem: Send + Sync {
    /// Check if a path exists.
    async fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Read file contents as a string.
    ///
    /// # Errors
    ///
    /// Returns `io::ErrorKind::NotFound` if file doesn't exist.
    /// Returns `io::ErrorKind::InvalidData` if file is not valid UTF-8.
    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Write string contents to a file, overwriting it.
    ///
    /// Parent directories are NOT created automatically.
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;

    /// Copy a file byte-for-byte, overwriting the destination.
    async fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Atomically rename a file.
    ///
    /// Used for atomic file updates (write to .tmp, then rename).
    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Recursively remove a directory.
    ///
    /// A missing directory is not an error. Symlinks are refused, and the
    /// project root itself can never be removed.
    async fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Get the project root this filesystem is scoped to.
    fn project_root(&self) -> &Path;
}
