//! Resolved compilation units.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::folder::SourceFolder;

/// The resolved, ordered list of source directories for one variant.
///
/// Folder order is precedence order, most specific first: when two folders
/// define the same file, the earlier folder wins. Paths are unique within a
/// unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompilationUnit {
    /// Variant name, e.g. `androidLibDebug`.
    pub name: String,
    /// Source folders in precedence order.
    pub source_folders: Vec<SourceFolder>,
}

impl CompilationUnit {
    /// Creates a compilation unit from already-ordered folders.
    pub fn new(name: impl Into<String>, source_folders: Vec<SourceFolder>) -> Self {
        Self {
            name: name.into(),
            source_folders,
        }
    }

    /// Returns the first folder path that appears more than once, if any.
    pub fn duplicate_folder(&self) -> Option<&str> {
        let mut seen = HashSet::new();
        self.source_folders
            .iter()
            .map(SourceFolder::path)
            .find(|path| !seen.insert(*path))
    }

    /// Iterates over the folder paths in precedence order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.source_folders.iter().map(SourceFolder::path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_duplicates() {
        let unit = CompilationUnit::new(
            "debug",
            vec![SourceFolder::local("src/debug"), SourceFolder::local("src/main")],
        );
        assert_eq!(unit.duplicate_folder(), None);
        assert_eq!(unit.paths().collect::<Vec<_>>(), vec!["src/debug", "src/main"]);
    }

    #[test]
    fn duplicate_detected_regardless_of_flag() {
        let unit = CompilationUnit::new(
            "debug",
            vec![
                SourceFolder::local("src/main"),
                SourceFolder::dependency("lib/src/main"),
                SourceFolder::dependency("src/main"),
            ],
        );
        assert_eq!(unit.duplicate_folder(), Some("src/main"));
    }

    #[test]
    fn serde_uses_camel_case() {
        let unit = CompilationUnit::new("main", vec![SourceFolder::local("src/main/sqldelight")]);
        let json = serde_json::to_string(&unit).unwrap();
        assert!(json.contains("\"sourceFolders\""));
        let back: CompilationUnit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, unit);
    }
}
