//! Safe file update operations

use modules_check_fs::FileSystem;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Append a suffix to the full file name (`package.json` -> `package.json.tmp`)
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(OsString::from)
        .unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// File updater that performs atomic writes
#[derive(Debug, Default)]
pub struct FileUpdater;

impl FileUpdater {
    /// Create a new file updater
    pub fn new() -> Self {
        Self
    }

    /// Atomically update a file using FileSystem
    ///
    /// Strategy:
    /// 1. Write to temporary file in same directory (ensures same filesystem)
    /// 2. Verify contents can be read back
    /// 3. Rename (atomic on POSIX, best-effort on Windows)
    ///
    /// # Errors
    /// Returns an error if the file cannot be written or renamed
    pub async fn update_file<F: FileSystem>(
        &self,
        fs: &Arc<F>,
        path: &Path,
        new_contents: &str,
    ) -> io::Result<()> {
        let temp_path = with_suffix(path, ".tmp");

        fs.write(&temp_path, new_contents).await?;

        let written = fs.read_to_string(&temp_path).await?;
        if written != new_contents {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Read-back mismatch for {}", temp_path.display()),
            ));
        }

        fs.rename(&temp_path, path).await
    }
}
