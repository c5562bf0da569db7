//! Registry client trait and version normalization

use crate::error::{Error, Result};

/// Something that can report the latest published version of a package
#[async_trait::async_trait]
pub trait RegistryClient: Send + Sync {
    /// Raw latest version string as reported by the registry (e.g. "1.3.0")
    async fn latest_version(&self, package: &str) -> Result<String>;

    /// Latest version as a caret constraint (e.g. "^1.3.0")
    async fn latest_constraint(&self, package: &str) -> Result<String> {
        let raw = self.latest_version(package).await?;
        normalize_constraint(package, &raw)
    }
}

/// Turn raw registry output into a caret constraint
///
/// Line breaks are removed and surrounding whitespace trimmed before the `^`
/// is prepended.
pub fn normalize_constraint(package: &str, raw: &str) -> Result<String> {
    let joined: String = raw.chars().filter(|c| *c != '\n' && *c != '\r').collect();
    let version = joined.trim();
    if version.is_empty() {
        return Err(Error::EmptyVersion(package.to_string()));
    }
    Ok(format!("^{}", version))
}

/// Basic package name validation
///
/// Names are passed to external commands as a single argument, so a leading
/// `-` is rejected to keep it from being read as an option.
pub fn validate_package_name(package: &str) -> Result<()> {
    if package.trim().is_empty() {
        return Err(Error::InvalidPackageName(
            "Package name cannot be empty".to_string(),
        ));
    }
    if package.starts_with('-') {
        return Err(Error::InvalidPackageName(format!(
            "'{}' looks like a command-line option",
            package
        )));
    }
    if package.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(Error::InvalidPackageName(format!(
            "'{}' contains whitespace or control characters",
            package
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_newlines() {
        assert_eq!(normalize_constraint("left-pad", "1.3.0\n").unwrap(), "^1.3.0");
        assert_eq!(normalize_constraint("x", "  2.0.0\r\n").unwrap(), "^2.0.0");
        assert_eq!(
            normalize_constraint("x", "1.0.0-beta.1\n").unwrap(),
            "^1.0.0-beta.1"
        );
    }

    #[test]
    fn test_normalize_empty_output() {
        assert!(matches!(
            normalize_constraint("ghost", "\n\n"),
            Err(Error::EmptyVersion(name)) if name == "ghost"
        ));
    }

    #[test]
    fn test_validate_package_name() {
        assert!(validate_package_name("react").is_ok());
        assert!(validate_package_name("@types/node").is_ok());
        assert!(validate_package_name("").is_err());
        assert!(validate_package_name("--registry=evil").is_err());
        assert!(validate_package_name("a b").is_err());
    }

    struct Fixed(&'static str);

    #[async_trait::async_trait]
    impl RegistryClient for Fixed {
        async fn latest_version(&self, _package: &str) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[tokio::test]
    async fn test_latest_constraint_default_method() {
        let registry = Fixed("4.17.21\n");
        assert_eq!(registry.latest_constraint("lodash").await.unwrap(), "^4.17.21");
    }
}
