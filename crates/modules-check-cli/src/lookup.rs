use modules_check_config::{RegistryBackend, RegistrySettings};
use modules_check_registry::{HttpRegistry, NpmCliRegistry, RegistryClient};
use std::path::Path;

/// Build the configured registry backend
///
/// The npm CLI backend runs from the project directory so a project
/// `.npmrc` is honored.
pub fn registry_from_settings(
    settings: &RegistrySettings,
    project_dir: &Path,
) -> modules_check_registry::Result<Box<dyn RegistryClient>> {
    match settings.backend {
        RegistryBackend::NpmCli => Ok(Box::new(
            NpmCliRegistry::with_command(settings.program.clone(), settings.args.clone())
                .current_dir(project_dir),
        )),
        RegistryBackend::Http => Ok(Box::new(HttpRegistry::with_base_url(&settings.url)?)),
    }
}
