//! Version lookups through the npm command-line client

use crate::client::{validate_package_name, RegistryClient};
use crate::error::{Error, Result};
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

/// Argument placeholder replaced with the package name
pub const PACKAGE_PLACEHOLDER: &str = "{package}";

/// Runs `npm info <package> version` (or a configured equivalent) per lookup
///
/// The package name is substituted into the argument list, never into a
/// shell string. stdout is captured and taken as the version.
#[derive(Debug, Clone)]
pub struct NpmCliRegistry {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl NpmCliRegistry {
    /// `npm info {package} version`
    pub fn new() -> Self {
        Self::with_command(
            "npm",
            ["info", PACKAGE_PLACEHOLDER, "version"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
    }

    /// Use a custom program and argument template
    ///
    /// Every argument equal to or containing `{package}` has it replaced by
    /// the package name.
    pub fn with_command(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            current_dir: None,
        }
    }

    /// Run lookups from this directory (so a project `.npmrc` applies)
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    fn command_args(&self, package: &str) -> Vec<String> {
        self.args
            .iter()
            .map(|arg| arg.replace(PACKAGE_PLACEHOLDER, package))
            .collect()
    }
}

impl Default for NpmCliRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl RegistryClient for NpmCliRegistry {
    async fn latest_version(&self, package: &str) -> Result<String> {
        validate_package_name(package)?;

        let args = self.command_args(package);
        debug!(program = %self.program, ?args, "querying registry");

        let mut command = Command::new(&self.program);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        let output = command.output().await.map_err(|source| Error::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            return Err(Error::CommandFailed {
                package: package.to_string(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
