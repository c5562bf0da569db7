//! Latest-version lookups against the npm registry
//!
//! Two backends implement [`RegistryClient`]:
//! - [`NpmCliRegistry`] shells out to `npm info <package> version`, so the
//!   user's npm configuration (registry, auth, proxies) applies as-is.
//! - [`HttpRegistry`] reads `dist-tags.latest` from the registry's JSON API.
//!
//! Lookups are one-shot: no caching, no retries, no batching.
//!
//! # Example
//!
//! ```no_run
//! use modules_check_registry::{NpmCliRegistry, RegistryClient};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = NpmCliRegistry::new();
//!     let constraint = registry.latest_constraint("left-pad").await?;
//!     println!("left-pad {}", constraint);
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod http;
mod npm_cli;

pub use client::{normalize_constraint, validate_package_name, RegistryClient};
pub use error::{Error, Result};
pub use http::{HttpRegistry, NPM_REGISTRY_URL};
pub use npm_cli::{NpmCliRegistry, PACKAGE_PLACEHOLDER};
