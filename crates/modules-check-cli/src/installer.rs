//! Clearing the installed-package directory and reinstalling from the
//! rewritten manifest.

use async_trait::async_trait;
use modules_check_config::InstallSettings;
use modules_check_fs::FileSystem;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::sync::Arc;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Failed to clear {path}: {source}")]
    Clear {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to run '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("'{command}' exited with {status}")]
    Failed { command: String, status: ExitStatus },
}

/// Package manager integration
#[async_trait]
pub trait Installer: Send + Sync {
    /// Installed-package directory, relative to the project root
    fn modules_dir(&self) -> &Path;

    /// Remove the installed-package directory. A missing directory is fine.
    async fn clear<F: FileSystem>(&self, fs: &Arc<F>) -> Result<(), InstallError>;

    /// Install from the manifest in `project_dir`, waiting for completion.
    async fn install(&self, project_dir: &Path) -> Result<(), InstallError>;
}

/// Runs `npm install` (or a configured replacement) with inherited stdio.
#[derive(Debug, Clone)]
pub struct NpmInstaller {
    program: String,
    args: Vec<String>,
    modules_dir: PathBuf,
}

impl NpmInstaller {
    pub fn new() -> Self {
        Self::from_settings(&InstallSettings::default())
    }

    pub fn from_settings(settings: &InstallSettings) -> Self {
        Self {
            program: settings.program.clone(),
            args: settings.args.clone(),
            modules_dir: settings.modules_dir.clone(),
        }
    }

    fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Default for NpmInstaller {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Installer for NpmInstaller {
    fn modules_dir(&self) -> &Path {
        &self.modules_dir
    }

    async fn clear<F: FileSystem>(&self, fs: &Arc<F>) -> Result<(), InstallError> {
        let path = fs.project_root().join(&self.modules_dir);
        debug!(path = %path.display(), "removing installed packages");
        fs.remove_dir_all(&path)
            .await
            .map_err(|source| InstallError::Clear { path, source })
    }

    async fn install(&self, project_dir: &Path) -> Result<(), InstallError> {
        let command = self.command_line();
        info!(%command, dir = %project_dir.display(), "running installer");

        let status = Command::new(&self.program)
            .args(&self.args)
            .current_dir(project_dir)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|source| InstallError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(InstallError::Failed { command, status });
        }
        Ok(())
    }
}
