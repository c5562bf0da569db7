//! The update pipeline: read, resolve, back up, rewrite, reinstall.

use crate::installer::{Installer, NpmInstaller};
use crate::lookup::registry_from_settings;
use crate::reporter::Reporter;
use anyhow::{Context, Result};
use modules_check_config::ModulesCheckConfig;
use modules_check_deps::{DependencyType, Manifest, ResolvedDependency};
use modules_check_fs::{FileSystem, NativeFileSystem};
use modules_check_registry::RegistryClient;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Inputs for one run
#[derive(Debug, Clone)]
pub struct RunOptions {
    manifest_path: PathBuf,
    project_dir: PathBuf,
    config: ModulesCheckConfig,
}

impl RunOptions {
    /// `manifest_path` is made absolute against the current directory.
    pub fn new(manifest_path: &Path, config: ModulesCheckConfig) -> std::io::Result<Self> {
        let manifest_path = std::path::absolute(manifest_path)?;
        let project_dir = project_dir_of(&manifest_path);
        Ok(Self {
            manifest_path,
            project_dir,
            config,
        })
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Directory holding the manifest; lookups and the installer run here.
    pub fn project_dir(&self) -> &Path {
        &self.project_dir
    }

    pub fn config(&self) -> &ModulesCheckConfig {
        &self.config
    }
}

pub fn project_dir_of(manifest_path: &Path) -> PathBuf {
    match manifest_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// What a completed run did
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub resolved: Vec<ResolvedDependency>,
    pub backup_path: PathBuf,
    pub installed: bool,
}

impl RunSummary {
    pub fn changed(&self) -> usize {
        self.resolved.iter().filter(|dep| dep.is_changed()).count()
    }
}

/// Run against the real filesystem, registry and package manager
pub async fn execute(options: &RunOptions) -> Result<RunSummary> {
    let fs = Arc::new(NativeFileSystem::new(options.project_dir()).map_err(|source| {
        modules_check_deps::Error::FileNotFound {
            path: options.manifest_path().to_path_buf(),
            source,
        }
    })?);
    let registry = registry_from_settings(&options.config().registry, options.project_dir())
        .context("Failed to set up registry client")?;
    let installer = NpmInstaller::from_settings(&options.config().install);
    let mut reporter = Reporter::stdout(options.config().output.color);

    run(&fs, options, registry.as_ref(), &installer, &mut reporter).await
}

/// Every step of a run, with each collaborator supplied by the caller
///
/// Nothing is written until every lookup has succeeded, and the backup is
/// taken before the manifest is replaced.
pub async fn run<F, R, I, W>(
    fs: &Arc<F>,
    options: &RunOptions,
    registry: &R,
    installer: &I,
    reporter: &mut Reporter<W>,
) -> Result<RunSummary>
where
    F: FileSystem,
    R: RegistryClient + ?Sized,
    I: Installer,
    W: Write,
{
    let path = options.manifest_path();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let manifest = Manifest::load(fs, path).await?;

    reporter.status("Checking latest version...")?;
    let resolved = resolve_dependencies(&manifest, registry, reporter).await?;

    reporter.status(&format!("Backup {}", file_name))?;
    let backup_path = modules_check_deps::backup(fs, path).await?;

    reporter.status(&format!("Create new {}", file_name))?;
    let document = modules_check_deps::merge(&manifest, &resolved);
    modules_check_deps::write(fs, path, &document).await?;

    let installed = if options.config().install.enabled {
        reinstall(fs, options.project_dir(), installer, reporter).await?;
        true
    } else {
        info!("install step disabled, skipping");
        false
    };

    reporter.flush()?;
    let summary = RunSummary {
        resolved,
        backup_path,
        installed,
    };
    info!(
        total = summary.resolved.len(),
        changed = summary.changed(),
        "update complete"
    );
    Ok(summary)
}

/// Look up every dependency in manifest order, printing one comparison line
/// each, grouped by dependency type
///
/// The first failed lookup aborts the whole run.
pub async fn resolve_dependencies<R, W>(
    manifest: &Manifest,
    registry: &R,
    reporter: &mut Reporter<W>,
) -> Result<Vec<ResolvedDependency>>
where
    R: RegistryClient + ?Sized,
    W: Write,
{
    let mut resolved = Vec::new();

    for dep_type in DependencyType::ALL {
        reporter.group_header(dep_type)?;
        for dep in manifest.dependencies_of_type(dep_type) {
            let latest = registry
                .latest_constraint(&dep.name)
                .await
                .with_context(|| format!("Failed to look up latest version of {}", dep.name))?;
            debug!(package = %dep.name, current = %dep.version_req, %latest, "resolved");

            let record = ResolvedDependency::new(dep, latest);
            reporter.comparison(&record)?;
            resolved.push(record);
        }
        reporter.group_end()?;
    }

    Ok(resolved)
}

async fn reinstall<F, I, W>(
    fs: &Arc<F>,
    project_dir: &Path,
    installer: &I,
    reporter: &mut Reporter<W>,
) -> Result<()>
where
    F: FileSystem,
    I: Installer,
    W: Write,
{
    reporter.status(&format!("clear old {}", installer.modules_dir().display()))?;
    installer.clear(fs).await?;

    reporter.status("installing latest version dependencies")?;
    // Let the installer's own output follow ours in order
    reporter.flush()?;
    installer.install(project_dir).await?;
    Ok(())
}
