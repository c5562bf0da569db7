use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for modules-check
///
/// Every section and field is optional in the TOML file; anything left out
/// falls back to the npm defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ModulesCheckConfig {
    /// How latest versions are looked up
    pub registry: RegistrySettings,

    /// How dependencies are reinstalled
    pub install: InstallSettings,

    /// Terminal output
    pub output: OutputSettings,
}

/// Where latest versions come from
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum RegistryBackend {
    /// Run the npm CLI once per package
    #[default]
    NpmCli,
    /// Query the registry's JSON API directly
    Http,
}

/// Registry lookup settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RegistrySettings {
    /// Lookup backend
    pub backend: RegistryBackend,

    /// Program run by the `npm-cli` backend
    pub program: String,

    /// Arguments for the `npm-cli` backend; `{package}` is substituted
    pub args: Vec<String>,

    /// Registry base URL for the `http` backend
    pub url: String,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            backend: RegistryBackend::default(),
            program: default_npm(),
            args: vec!["info".to_string(), "{package}".to_string(), "version".to_string()],
            url: "https://registry.npmjs.org".to_string(),
        }
    }
}

/// Reinstall settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InstallSettings {
    /// Run the install step after rewriting the manifest
    pub enabled: bool,

    /// Package manager program
    pub program: String,

    /// Arguments passed to the package manager
    pub args: Vec<String>,

    /// Installed-package directory, relative to the manifest's directory
    pub modules_dir: PathBuf,
}

impl Default for InstallSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            program: default_npm(),
            args: vec!["install".to_string()],
            modules_dir: PathBuf::from("node_modules"),
        }
    }
}

/// When to colorize terminal output
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorChoice {
    /// Color when stdout is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Output settings
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    pub color: ColorChoice,
}

fn default_npm() -> String {
    "npm".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: ModulesCheckConfig = toml::from_str("").unwrap();
        assert_eq!(config, ModulesCheckConfig::default());
        assert_eq!(config.registry.program, "npm");
        assert_eq!(config.registry.args, ["info", "{package}", "version"]);
        assert!(config.install.enabled);
        assert_eq!(config.install.modules_dir, PathBuf::from("node_modules"));
    }

    #[test]
    fn test_partial_sections() {
        let config: ModulesCheckConfig = toml::from_str(
            r#"
[registry]
backend = "http"
url = "https://npm.internal.example/"

[install]
program = "pnpm"

[output]
color = "never"
"#,
        )
        .unwrap();

        assert_eq!(config.registry.backend, RegistryBackend::Http);
        assert_eq!(config.registry.url, "https://npm.internal.example/");
        assert_eq!(config.registry.program, "npm");
        assert_eq!(config.install.program, "pnpm");
        assert_eq!(config.install.args, ["install"]);
        assert_eq!(config.output.color, ColorChoice::Never);
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result: Result<ModulesCheckConfig, _> = toml::from_str("[install]\nskip = true\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_roundtrip_names() {
        let text = toml::to_string_pretty(&ModulesCheckConfig::default()).unwrap();
        assert!(text.contains("backend = \"npm-cli\""));
        assert!(text.contains("color = \"auto\""));
    }
}
