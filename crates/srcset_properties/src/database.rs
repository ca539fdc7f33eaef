//! Databases and the persisted properties root.

use serde::{Deserialize, Serialize};
use srcset_common::CompilationUnit;

/// One logical generated-code target within a module.
///
/// The package name and output directory are fixed when the database is
/// registered; the compilation units are in variant declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Database {
    /// Package of the generated code.
    pub package_name: String,
    /// Directory generated code is written to.
    pub output_directory: String,
    /// Resolved compilation units, one per variant.
    pub compilation_units: Vec<CompilationUnit>,
}

impl Database {
    /// Looks up a compilation unit by variant name.
    pub fn compilation_unit(&self, name: &str) -> Option<&CompilationUnit> {
        self.compilation_units.iter().find(|u| u.name == name)
    }
}

/// The persisted root: every database of a module, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertiesFile {
    /// Databases in declaration order.
    pub databases: Vec<Database>,
}

impl PropertiesFile {
    /// Creates a properties file from databases in declaration order.
    pub fn new(databases: Vec<Database>) -> Self {
        Self { databases }
    }
}
