pub mod manager;
pub mod types;
pub mod validation;

pub use manager::{ConfigError, ConfigManager, ConfigSource, CONFIG_ENV_VAR, PROJECT_CONFIG_FILE};
pub use types::{
    ColorChoice, InstallSettings, ModulesCheckConfig, OutputSettings, RegistryBackend,
    RegistrySettings,
};
pub use validation::{validate_config, ValidationError};
