use crate::types::ModulesCheckConfig;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use url::Url;

/// Configuration values that are well-formed TOML but unusable
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be empty")]
    EmptyProgram(&'static str),

    #[error("registry.args must contain the {{package}} placeholder")]
    MissingPlaceholder,

    #[error("Invalid registry URL '{0}': {1}")]
    InvalidUrl(String, String),

    #[error("install.modules_dir must be a relative path inside the project: {0}")]
    ModulesDirOutsideProject(PathBuf),
}

/// Check a loaded configuration
///
/// This ensures:
/// 1. Both programs are non-empty
/// 2. The lookup arguments name the package somewhere
/// 3. The registry URL parses and is http(s)
/// 4. `modules_dir` cannot point outside the project, since it gets deleted
pub fn validate_config(config: &ModulesCheckConfig) -> Result<(), ValidationError> {
    if config.registry.program.trim().is_empty() {
        return Err(ValidationError::EmptyProgram("registry.program"));
    }
    if config.install.program.trim().is_empty() {
        return Err(ValidationError::EmptyProgram("install.program"));
    }

    if !config.registry.args.iter().any(|arg| arg.contains("{package}")) {
        return Err(ValidationError::MissingPlaceholder);
    }

    let url = Url::parse(&config.registry.url)
        .map_err(|e| ValidationError::InvalidUrl(config.registry.url.clone(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ValidationError::InvalidUrl(
            config.registry.url.clone(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    validate_modules_dir(&config.install.modules_dir)
}

/// `modules_dir` must be a plain relative path with at least one component
fn validate_modules_dir(dir: &Path) -> Result<(), ValidationError> {
    let mut normal = 0;
    for component in dir.components() {
        match component {
            Component::Normal(_) => normal += 1,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ValidationError::ModulesDirOutsideProject(dir.to_path_buf()));
            }
        }
    }
    if normal == 0 {
        return Err(ValidationError::ModulesDirOutsideProject(dir.to_path_buf()));
    }
    Ok(())
}
