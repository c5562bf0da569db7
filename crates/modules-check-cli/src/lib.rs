//! modules-check: rewrite a package.json so every dependency points at its
//! latest published version, then reinstall.
//!
//! The binary is a thin wrapper around [`pipeline::execute`]. The pieces are
//! exposed so the pipeline can be driven with other registries, installers,
//! or output sinks.

pub mod installer;
pub mod lookup;
pub mod pipeline;
pub mod reporter;

pub use installer::{InstallError, Installer, NpmInstaller};
pub use pipeline::{execute, resolve_dependencies, run, RunOptions, RunSummary};
pub use reporter::Reporter;
