//! package.json support

pub mod manifest;
pub mod writer;

pub use manifest::Manifest;
pub use writer::{backup, backup_path, merge, write};
