//! modules-check - bump package.json dependencies to their latest versions.

use anyhow::{Context, Result};
use clap::Parser;
use modules_check_cli::reporter::Reporter;
use modules_check_cli::{execute, RunOptions};
use modules_check_config::{ColorChoice, ConfigManager};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "modules-check")]
#[command(version, long_about = None)]
#[command(about = "Update every dependency in a package.json to its latest version and reinstall")]
struct Cli {
    /// Manifest to update (exactly one)
    #[arg(value_name = "PACKAGE_JSON")]
    manifests: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let manifest = match cli.manifests.as_slice() {
        [manifest] => manifest.clone(),
        _ => {
            Reporter::stdout(ColorChoice::Auto)
                .usage()
                .context("Failed to write usage")?;
            return Ok(());
        }
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to create async runtime")?;
    runtime.block_on(run(&manifest))
}

async fn run(manifest: &Path) -> Result<()> {
    let absolute = std::path::absolute(manifest)
        .with_context(|| format!("Failed to resolve {}", manifest.display()))?;
    let project_dir = modules_check_cli::pipeline::project_dir_of(&absolute);

    let manager = ConfigManager::discover(&project_dir)
        .await
        .context("Failed to load configuration")?;
    info!(source = %manager.source(), "configuration loaded");

    let options = RunOptions::new(&absolute, manager.into_config())
        .with_context(|| format!("Failed to resolve {}", manifest.display()))?;
    execute(&options).await?;
    Ok(())
}
