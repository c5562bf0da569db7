//! Core types for dependency management

use std::fmt;

/// Type of dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DependencyType {
    /// Runtime dependency (`dependencies`)
    Runtime,
    /// Development dependency (`devDependencies`)
    Dev,
}

impl DependencyType {
    /// All dependency types, in the order they are processed
    pub const ALL: [DependencyType; 2] = [DependencyType::Runtime, DependencyType::Dev];

    /// The package.json field holding this dependency group
    pub fn field(self) -> &'static str {
        match self {
            Self::Runtime => "dependencies",
            Self::Dev => "devDependencies",
        }
    }
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// A dependency as declared in the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Package name
    pub name: String,
    /// Version constraint as written (e.g. "^1.0.0")
    pub version_req: String,
    /// Type of dependency
    pub dep_type: DependencyType,
}

/// A dependency paired with the constraint it will be rewritten to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDependency {
    /// Package name
    pub name: String,
    /// Constraint currently declared in the manifest
    pub current: String,
    /// Constraint derived from the latest published version
    pub latest: String,
    /// Type of dependency
    pub dep_type: DependencyType,
}

impl ResolvedDependency {
    /// Pair a declared dependency with its resolved constraint
    pub fn new(dependency: &Dependency, latest: impl Into<String>) -> Self {
        Self {
            name: dependency.name.clone(),
            current: dependency.version_req.clone(),
            latest: latest.into(),
            dep_type: dependency.dep_type,
        }
    }

    /// Whether the resolved constraint differs from the declared one
    pub fn is_changed(&self) -> bool {
        self.current != self.latest
    }
}
