//! package.json backup, merge and rewrite

use crate::update::{with_suffix, FileUpdater};
use crate::{DependencyType, Error, Manifest, ResolvedDependency, Result};
use modules_check_fs::FileSystem;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// Location of the backup for a manifest: `<path>.backup`
pub fn backup_path(path: &Path) -> PathBuf {
    with_suffix(path, ".backup")
}

/// Copy the manifest to `<path>.backup`, replacing any previous backup
///
/// Returns the backup location.
///
/// # Errors
/// Returns [`Error::Backup`] if the copy fails. Callers must not go on to
/// overwrite the manifest in that case.
pub async fn backup<F: FileSystem>(fs: &Arc<F>, path: &Path) -> Result<PathBuf> {
    let backup = backup_path(path);
    fs.copy(path, &backup)
        .await
        .map_err(|source| Error::Backup {
            path: path.to_path_buf(),
            backup: backup.clone(),
            source,
        })?;
    debug!(backup = %backup.display(), "backed up manifest");
    Ok(backup)
}

/// Build the rewritten manifest document
///
/// Both dependency groups are replaced wholesale by the resolved entries, so
/// packages that were not resolved are dropped. Both keys are always present
/// in the result. Every other key is carried over as-is and keeps its
/// position.
pub fn merge(manifest: &Manifest, resolved: &[ResolvedDependency]) -> Map<String, Value> {
    let mut document = manifest.document().clone();

    for dep_type in DependencyType::ALL {
        let group: Map<String, Value> = resolved
            .iter()
            .filter(|r| r.dep_type == dep_type)
            .map(|r| (r.name.clone(), Value::String(r.latest.clone())))
            .collect();
        document.insert(dep_type.field().to_string(), Value::Object(group));
    }

    document
}

/// Serialize the document with 2-space indentation and replace the file
///
/// # Errors
/// Returns [`Error::Write`] on any filesystem failure.
pub async fn write<F: FileSystem>(
    fs: &Arc<F>,
    path: &Path,
    document: &Map<String, Value>,
) -> Result<()> {
    // Pretty print with 2-space indentation (npm standard)
    let formatted = serde_json::to_string_pretty(document)?;

    FileUpdater::new()
        .update_file(fs, path, &formatted)
        .await
        .map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(path = %path.display(), bytes = formatted.len(), "wrote manifest");
    Ok(())
}
