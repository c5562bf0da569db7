//! Project-scoped filesystem abstraction for modules-check.
//!
//! Every operation the tool performs on disk (reading the manifest, writing the
//! backup, replacing the manifest, clearing `node_modules`) goes through the
//! `FileSystem` trait. The native implementation refuses to touch anything
//! outside the project root it was created for.
//!
//! # Example
//!
//! ```no_run
//! use modules_check_fs::{FileSystem, NativeFileSystem};
//! use std::sync::Arc;
//! use std::path::Path;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> std::io::Result<()> {
//! let fs = Arc::new(NativeFileSystem::new(".")?);
//! let contents = fs.read_to_string(Path::new("package.json")).await?;
//! println!("{}", contents);
//! # Ok(())
//! # }
//! ```

mod file_system;
pub mod native;

pub use file_system::FileSystem;
pub use native::NativeFileSystem;
