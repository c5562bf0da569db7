//! Native filesystem implementation using std::fs + tokio.

use crate::FileSystem;
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::task;
use tracing::debug;

/// Native filesystem implementation using std::fs + tokio.
///
/// This implementation wraps blocking std::fs calls with tokio::spawn_blocking
/// to avoid blocking the async runtime.
#[derive(Debug, Clone)]
pub struct NativeFileSystem {
    project_root: PathBuf,
}

impl NativeFileSystem {
    /// Create a new native filesystem scoped to a project root.
    ///
    /// # Errors
    ///
    /// Returns an error if the root doesn't exist or can't be canonicalized.
    pub fn new(project_root: impl AsRef<Path>) -> io::Result<Self> {
        let root = project_root.as_ref();
        let project_root = root.canonicalize().map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("Project root does not exist: {} ({})", root.display(), e),
            )
        })?;

        if !project_root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Project root is not a directory: {}", project_root.display()),
            ));
        }

        Ok(Self { project_root })
    }

    /// Make a path absolute against the project root without touching disk.
    fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.project_root.join(path)
        }
    }

    /// Validate that a path is within the project root.
    ///
    /// Existing paths are canonicalized so symlinks cannot be used to escape.
    /// Paths that don't exist yet resolve through their parent directory.
    fn validate_path(&self, path: &Path) -> io::Result<PathBuf> {
        let absolute = self.absolute(path);

        let resolved = match absolute.canonicalize() {
            Ok(canonical) => canonical,
            Err(_) => match (absolute.parent(), absolute.file_name()) {
                (Some(parent), Some(name)) => match parent.canonicalize() {
                    Ok(canonical_parent) => canonical_parent.join(name),
                    Err(_) => normalize_lexically(&absolute),
                },
                _ => normalize_lexically(&absolute),
            },
        };

        if !resolved.starts_with(&self.project_root) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!(
                    "Path traversal detected: {} is outside project root {}",
                    resolved.display(),
                    self.project_root.display()
                ),
            ));
        }

        Ok(resolved)
    }
}

/// Syntactic normalization for paths that don't exist on disk.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                result = PathBuf::from(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                result.pop();
            }
            Component::Normal(name) => result.push(name),
        }
    }
    result
}

fn join_error(e: task::JoinError) -> io::Error {
    io::Error::other(e)
}

#[async_trait::async_trait]
impl FileSystem for NativeFileSystem {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        let validated = self.validate_path(path)?;
        task::spawn_blocking(move || validated.try_exists())
            .await
            .map_err(join_error)?
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let validated = self.validate_path(path)?;
        task::spawn_blocking(move || std::fs::read_to_string(&validated))
            .await
            .map_err(join_error)?
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let validated = self.validate_path(path)?;
        let contents = contents.to_owned();
        task::spawn_blocking(move || std::fs::write(&validated, contents))
            .await
            .map_err(join_error)?
    }

    async fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        let from_validated = self.validate_path(from)?;
        let to_validated = self.validate_path(to)?;
        task::spawn_blocking(move || std::fs::copy(&from_validated, &to_validated).map(|_| ()))
            .await
            .map_err(join_error)?
    }

    async fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let from_validated = self.validate_path(from)?;
        let to_validated = self.validate_path(to)?;
        task::spawn_blocking(move || std::fs::rename(&from_validated, &to_validated))
            .await
            .map_err(join_error)?
    }

    async fn remove_dir_all(&self, path: &Path) -> io::Result<()> {
        // Checked before canonicalizing, which would follow the link.
        let absolute = self.absolute(path);
        let link_meta = match std::fs::symlink_metadata(&absolute) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %absolute.display(), "nothing to remove");
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        if link_meta.file_type().is_symlink() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("Refusing to remove symlink: {}", absolute.display()),
            ));
        }
        if !link_meta.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Not a directory: {}", absolute.display()),
            ));
        }

        let validated = self.validate_path(path)?;
        if validated == self.project_root {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "Refusing to remove the project root",
            ));
        }

        debug!(path = %validated.display(), "removing directory");
        task::spawn_blocking(move || std::fs::remove_dir_all(&validated))
            .await
            .map_err(join_error)?
    }

    fn project_root(&self) -> &Path {
        &self.project_root
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/a/b/../c/./d")),
            PathBuf::from("/a/c/d")
        );
        assert_eq!(normalize_lexically(Path::new("/../x")), PathBuf::from("/x"));
    }

    #[test]
    fn test_validate_path_rejects_escape() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let fs = NativeFileSystem::new(temp_dir.path()).unwrap();

        let err = fs
            .validate_path(Path::new("../outside/package.json"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_validate_path_allows_new_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let fs = NativeFileSystem::new(temp_dir.path()).unwrap();

        let validated = fs.validate_path(Path::new("package.json.backup")).unwrap();
        assert!(validated.starts_with(fs.project_root()));
        assert!(validated.ends_with("package.json.backup"));
    }

    #[test]
    fn test_new_rejects_missing_root() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let missing = temp_dir.path().join("does-not-exist");
        assert!(NativeFileSystem::new(&missing).is_err());
    }
}
