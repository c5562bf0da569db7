//! package.json reader

use crate::{Dependency, DependencyType, Error, Result};
use modules_check_fs::FileSystem;
use serde_json::{Map, Value};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

/// A parsed package.json
///
/// The whole document is kept so that a rewrite can pass every key other
/// than the dependency groups through untouched. Dependencies are listed in
/// the order they appear in the file.
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    document: Map<String, Value>,
    runtime: Vec<Dependency>,
    dev: Vec<Dependency>,
}

impl Manifest {
    /// Read and parse a manifest from disk
    ///
    /// # Errors
    /// - [`Error::FileNotFound`] if the file is missing or unreadable
    /// - [`Error::Parse`] if it is not valid JSON
    /// - [`Error::InvalidFormat`] if it is not a JSON object, or a dependency
    ///   group is malformed
    pub async fn load<F: FileSystem>(fs: &Arc<F>, path: &Path) -> Result<Self> {
        let content = fs.read_to_string(path).await.map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => {
                Error::InvalidFormat(path.to_path_buf(), "file is not valid UTF-8".to_string())
            }
            _ => Error::FileNotFound {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let manifest = Self::parse(path, &content)?;
        debug!(
            path = %path.display(),
            dependencies = manifest.runtime.len(),
            dev_dependencies = manifest.dev.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    /// Parse manifest contents that have already been read
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let document = match value {
            Value::Object(document) => document,
            other => {
                return Err(Error::InvalidFormat(
                    path.to_path_buf(),
                    format!("expected a JSON object, found {}", json_kind(&other)),
                ))
            }
        };

        let runtime = extract_group(path, &document, DependencyType::Runtime)?;
        let dev = extract_group(path, &document, DependencyType::Dev)?;

        Ok(Self {
            path: path.to_path_buf(),
            document,
            runtime,
            dev,
        })
    }

    /// Path the manifest was read from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full JSON document
    pub fn document(&self) -> &Map<String, Value> {
        &self.document
    }

    /// Get dependencies of a specific type
    pub fn dependencies_of_type(&self, dep_type: DependencyType) -> &[Dependency] {
        match dep_type {
            DependencyType::Runtime => &self.runtime,
            DependencyType::Dev => &self.dev,
        }
    }

    /// Runtime dependencies followed by dev dependencies
    pub fn all_dependencies(&self) -> impl Iterator<Item = &Dependency> {
        self.runtime.iter().chain(self.dev.iter())
    }

    /// Find a dependency by name
    pub fn find_dependency(&self, name: &str) -> Option<&Dependency> {
        self.all_dependencies().find(|d| d.name == name)
    }
}

/// Absent (or `null`) groups are treated as empty.
fn extract_group(
    path: &Path,
    document: &Map<String, Value>,
    dep_type: DependencyType,
) -> Result<Vec<Dependency>> {
    let field = dep_type.field();
    let entries = match document.get(field) {
        None | Some(Value::Null) => return Ok(vec![]),
        Some(Value::Object(entries)) => entries,
        Some(other) => {
            return Err(Error::InvalidFormat(
                path.to_path_buf(),
                format!("\"{}\" must be an object, found {}", field, json_kind(other)),
            ))
        }
    };

    entries
        .iter()
        .map(|(name, version)| match version {
            Value::String(version) => Ok(Dependency {
                name: name.clone(),
                version_req: version.clone(),
                dep_type,
            }),
            other => Err(Error::InvalidFormat(
                path.to_path_buf(),
                format!(
                    "version of \"{}\" in \"{}\" must be a string, found {}",
                    name,
                    field,
                    json_kind(other)
                ),
            )),
        })
        .collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
