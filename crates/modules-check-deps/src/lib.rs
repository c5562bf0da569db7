//! # modules-check-deps
//!
//! Reading and rewriting of `package.json` dependency manifests.
//!
//! This crate provides functionality to:
//! - Load a manifest and extract its `dependencies` and `devDependencies`
//! - Back up a manifest before it is modified
//! - Merge freshly resolved version constraints into the manifest
//! - Write the merged manifest back atomically
//!
//! ## Example
//!
//! ```rust,no_run
//! use modules_check_deps::{DependencyType, Manifest};
//! use modules_check_fs::NativeFileSystem;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let fs = Arc::new(NativeFileSystem::new("/work/app")?);
//! let manifest = Manifest::load(&fs, Path::new("/work/app/package.json")).await?;
//!
//! for dep in manifest.dependencies_of_type(DependencyType::Runtime) {
//!     println!("{}: {}", dep.name, dep.version_req);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod npm;
pub mod types;
pub mod update;

pub use error::{Error, Result};
pub use npm::{backup, backup_path, merge, write, Manifest};
pub use types::{Dependency, DependencyType, ResolvedDependency};
