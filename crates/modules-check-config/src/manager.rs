use crate::types::ModulesCheckConfig;
use crate::validation::{validate_config, ValidationError};
use modules_check_fs::{FileSystem, NativeFileSystem};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "MODULES_CHECK_CONFIG";

/// Config file looked up next to the manifest
pub const PROJECT_CONFIG_FILE: &str = "modules-check.toml";

/// Errors that can occur during config loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {0}: {1}")]
    Io(PathBuf, #[source] io::Error),

    #[error("TOML deserialization error in {0}: {1}")]
    TomlDe(PathBuf, #[source] toml::de::Error),

    #[error("Invalid configuration in {0}: {1}")]
    Validation(String, #[source] ValidationError),

    #[error("Config file not found at {0}")]
    ConfigNotFound(PathBuf),
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Named by `MODULES_CHECK_CONFIG`
    Env(PathBuf),
    /// `modules-check.toml` in the project directory
    Project(PathBuf),
    /// `~/.modules-check/config.toml`
    User(PathBuf),
    /// No file found
    Defaults,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Env(path) | Self::Project(path) | Self::User(path) => {
                write!(f, "{}", path.display())
            }
            Self::Defaults => f.write_str("built-in defaults"),
        }
    }
}

/// Loaded configuration together with its origin
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: ModulesCheckConfig,
    source: ConfigSource,
}

impl ConfigManager {
    /// Default user config path (~/.modules-check/config.toml)
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".modules-check").join("config.toml"))
    }

    /// Find and load the configuration for a project
    ///
    /// Lookup order:
    /// 1. `MODULES_CHECK_CONFIG` (the file must exist)
    /// 2. `<project_dir>/modules-check.toml`
    /// 3. `~/.modules-check/config.toml`
    /// 4. defaults
    pub async fn discover(project_dir: &Path) -> Result<Self, ConfigError> {
        let env_path = std::env::var_os(CONFIG_ENV_VAR)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self::discover_with(env_path, project_dir, Self::user_config_path()).await
    }

    /// [`ConfigManager::discover`] with the environment and home directory
    /// supplied by the caller
    pub async fn discover_with(
        env_path: Option<PathBuf>,
        project_dir: &Path,
        user_path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(path) = env_path {
            let config = Self::load_from(&path).await?;
            return Ok(Self::new(config, ConfigSource::Env(path)));
        }

        let project_path = project_dir.join(PROJECT_CONFIG_FILE);
        if project_path.is_file() {
            let config = Self::load_from(&project_path).await?;
            return Ok(Self::new(config, ConfigSource::Project(project_path)));
        }

        if let Some(user_path) = user_path.filter(|p| p.is_file()) {
            let config = Self::load_from(&user_path).await?;
            return Ok(Self::new(config, ConfigSource::User(user_path)));
        }

        debug!("no config file found, using defaults");
        Ok(Self::new(ModulesCheckConfig::default(), ConfigSource::Defaults))
    }

    /// Load and validate config from a specific path
    pub async fn load_from(path: &Path) -> Result<ModulesCheckConfig, ConfigError> {
        let config_dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let fs = Arc::new(
            NativeFileSystem::new(config_dir)
                .map_err(|_| ConfigError::ConfigNotFound(path.to_path_buf()))?,
        );
        // Scoped filesystems resolve relative paths against their root
        let file = fs.project_root().join(path.file_name().unwrap_or_default());

        if !fs
            .exists(&file)
            .await
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?
        {
            return Err(ConfigError::ConfigNotFound(path.to_path_buf()));
        }

        let contents = fs
            .read_to_string(&file)
            .await
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        let config: ModulesCheckConfig =
            toml::from_str(&contents).map_err(|e| ConfigError::TomlDe(path.to_path_buf(), e))?;

        validate_config(&config)
            .map_err(|e| ConfigError::Validation(path.display().to_string(), e))?;

        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Wrap an already-built configuration
    pub fn new(config: ModulesCheckConfig, source: ConfigSource) -> Self {
        Self { config, source }
    }

    /// Get reference to config
    pub fn config(&self) -> &ModulesCheckConfig {
        &self.config
    }

    /// Where the config was loaded from
    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// Take the config out of the manager
    pub fn into_config(self) -> ModulesCheckConfig {
        self.config
    }
}
