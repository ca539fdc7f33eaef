//! A single source directory within a resolved compilation unit.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A source directory applicable to a compilation unit.
///
/// `path` is project-relative or absolute. `dependency` marks folders that
/// were contributed by another module rather than declared by a local source
/// set. Values are immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceFolder {
    path: String,
    dependency: bool,
}

impl SourceFolder {
    /// Creates a folder declared by a local source set.
    pub fn local(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            dependency: false,
        }
    }

    /// Creates a folder contributed by a module dependency.
    pub fn dependency(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            dependency: true,
        }
    }

    /// Creates a folder with an explicit dependency flag.
    pub fn new(path: impl Into<String>, dependency: bool) -> Self {
        Self {
            path: path.into(),
            dependency,
        }
    }

    /// Returns the directory path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns `true` if the folder comes from a module dependency.
    pub fn is_dependency(&self) -> bool {
        self.dependency
    }
}

impl fmt::Display for SourceFolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dependency {
            write!(f, "{} (dependency)", self.path)
        } else {
            f.write_str(&self.path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_and_dependency_constructors() {
        let local = SourceFolder::local("src/main/sqldelight");
        assert_eq!(local.path(), "src/main/sqldelight");
        assert!(!local.is_dependency());

        let dep = SourceFolder::dependency("lib/src/main/sqldelight");
        assert!(dep.is_dependency());
        assert_eq!(dep, SourceFolder::new("lib/src/main/sqldelight", true));
    }

    #[test]
    fn display_marks_dependencies() {
        assert_eq!(SourceFolder::local("a").to_string(), "a");
        assert_eq!(SourceFolder::dependency("b").to_string(), "b (dependency)");
    }

    #[test]
    fn serde_field_names() {
        let json = serde_json::to_string(&SourceFolder::local("src/main/sqldelight")).unwrap();
        assert_eq!(json, r#"{"path":"src/main/sqldelight","dependency":false}"#);
    }

    #[test]
    fn unknown_field_rejected() {
        let err = serde_json::from_str::<SourceFolder>(r#"{"path":"a","dependency":false,"x":1}"#);
        assert!(err.is_err());
    }
}
