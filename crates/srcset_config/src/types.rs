//! Configuration types deserialized from `srcset.toml`.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Directory name appended to `src/<source set>/` when a source set declares
/// no directories of its own.
pub const CONVENTIONAL_SOURCE_DIR: &str = "sqldelight";

/// Output directory prefix for databases that don't name one.
pub const DEFAULT_OUTPUT_ROOT: &str = "build/srcset";

/// The top-level project configuration parsed from `srcset.toml`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Core project metadata.
    pub project: ProjectMeta,
    /// Modules keyed by name.
    #[serde(default)]
    pub modules: BTreeMap<String, ModuleConfig>,
}

impl ProjectConfig {
    /// Returns the module with the given name.
    pub fn module(&self, name: &str) -> Option<&ModuleConfig> {
        self.modules.get(name)
    }

    /// Iterates over module names in sorted order.
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }
}

/// Core project metadata.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectMeta {
    /// The project name.
    pub name: String,
    /// Group identifier, used as the package name of databases that don't set one.
    #[serde(default)]
    pub group: Option<String>,
}

/// A single module: its source sets, variants and databases.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleConfig {
    /// Module directory relative to the project root. Defaults to the module name.
    /// Source-set directories are relative to it.
    #[serde(default)]
    pub path: Option<String>,
    /// Source sets keyed by name.
    #[serde(default)]
    pub source_sets: BTreeMap<String, SourceSetConfig>,
    /// Variants to resolve, in output order.
    #[serde(default)]
    pub variants: Vec<VariantSpec>,
    /// Databases to populate, in declaration order.
    #[serde(default)]
    pub databases: Vec<DatabaseConfig>,
}

impl ModuleConfig {
    /// Returns the module directory, falling back to the module name.
    pub fn path_or<'a>(&'a self, name: &'a str) -> &'a str {
        self.path.as_deref().unwrap_or(name)
    }
}

/// A source set declaration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSetConfig {
    /// Declared directories, module-relative. `None` means the conventional
    /// `src/<name>/sqldelight`.
    #[serde(default)]
    pub directories: Option<Vec<String>>,
    /// Source sets this one extends, most specific first.
    #[serde(default)]
    pub extends: Vec<String>,
    /// Other modules whose folders this source set picks up.
    #[serde(default)]
    pub dependencies: Vec<String>,
}

impl SourceSetConfig {
    /// Returns the declared directories, or the conventional one for `name`.
    pub fn directories_for(&self, name: &str) -> Vec<String> {
        match &self.directories {
            Some(dirs) => dirs.clone(),
            None => vec![format!("src/{name}/{CONVENTIONAL_SOURCE_DIR}")],
        }
    }
}

/// A variant to resolve.
///
/// Uses serde's untagged enum so that a plain string and a table with explicit
/// roots are both accepted.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum VariantSpec {
    /// A variant rooted at the source set with the same name.
    Name(String),
    /// A variant with explicit roots.
    Detailed {
        /// The variant name.
        name: String,
        /// Root source sets, most specific first.
        #[serde(default)]
        roots: Vec<String>,
    },
}

impl VariantSpec {
    /// Returns the variant name.
    pub fn name(&self) -> &str {
        match self {
            VariantSpec::Name(name) | VariantSpec::Detailed { name, .. } => name,
        }
    }

    /// Returns the explicit roots, empty when rooted at the variant's own set.
    pub fn roots(&self) -> &[String] {
        match self {
            VariantSpec::Name(_) => &[],
            VariantSpec::Detailed { roots, .. } => roots,
        }
    }
}

/// A database declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    /// The database name, e.g. `CashDatabase`.
    pub name: String,
    /// Package of the generated code. Defaults to `project.group`.
    #[serde(default)]
    pub package_name: Option<String>,
    /// Output directory, module-relative. Defaults to `build/srcset/<name>`.
    #[serde(default)]
    pub output_directory: Option<String>,
}

impl DatabaseConfig {
    /// Returns the configured output directory or the default for this database.
    pub fn output_directory_or_default(&self) -> String {
        self.output_directory
            .clone()
            .unwrap_or_else(|| format!("{DEFAULT_OUTPUT_ROOT}/{}", self.name))
    }
}
