//! Per-module registry of databases and their resolved compilation units.
//!
//! The [`DatabaseRegistry`] collects databases in declaration order and
//! rejects any database whose name, or whose package/output pair, is already
//! taken within the module.

use std::collections::HashSet;

use srcset_common::CompilationUnit;

use crate::database::{Database, PropertiesFile};
use crate::error::{Collision, RegistryError};

#[derive(Debug, Clone)]
struct RegisteredDatabase {
    name: String,
    database: Database,
}

/// Registry of all databases declared by one module.
pub struct DatabaseRegistry {
    module: String,
    entries: Vec<RegisteredDatabase>,
}

impl DatabaseRegistry {
    /// Creates an empty registry for the named module.
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            entries: Vec::new(),
        }
    }

    /// Returns the module this registry belongs to.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Registers a database with its resolved compilation units.
    ///
    /// The package name is taken as given; any defaulting happens before the
    /// call. Fails if the name or the `(package_name, output_directory)` pair
    /// is already registered, or if the units repeat a name or a folder.
    pub fn add_database(
        &mut self,
        name: impl Into<String>,
        package_name: impl Into<String>,
        output_directory: impl Into<String>,
        compilation_units: Vec<CompilationUnit>,
    ) -> Result<&Database, RegistryError> {
        let name = name.into();
        let package_name = package_name.into();
        let output_directory = output_directory.into();

        if self.entries.iter().any(|e| e.name == name) {
            return Err(self.duplicate(name, Collision::Name));
        }
        if let Some(existing) = self.entries.iter().find(|e| {
            e.database.package_name == package_name
                && e.database.output_directory == output_directory
        }) {
            let collision = Collision::Target {
                existing: existing.name.clone(),
                package_name,
                output_directory,
            };
            return Err(self.duplicate(name, collision));
        }

        let mut unit_names = HashSet::new();
        for unit in &compilation_units {
            if !unit_names.insert(unit.name.as_str()) {
                return Err(RegistryError::DuplicateCompilationUnit {
                    module: self.module.clone(),
                    database: name,
                    unit: unit.name.clone(),
                });
            }
            if let Some(path) = unit.duplicate_folder() {
                return Err(RegistryError::DuplicateSourceFolder {
                    module: self.module.clone(),
                    database: name,
                    unit: unit.name.clone(),
                    path: path.to_string(),
                });
            }
        }

        tracing::debug!(
            module = %self.module,
            database = %name,
            package = %package_name,
            units = compilation_units.len(),
            "registered database"
        );

        self.entries.push(RegisteredDatabase {
            name,
            database: Database {
                package_name,
                output_directory,
                compilation_units,
            },
        });
        let last = self.entries.len() - 1;
        Ok(&self.entries[last].database)
    }

    /// Looks up a registered database by name.
    pub fn get(&self, name: &str) -> Option<&Database> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| &e.database)
    }

    /// Returns the number of registered databases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the registry, producing the properties file in registration order.
    pub fn into_properties_file(self) -> PropertiesFile {
        PropertiesFile::new(self.entries.into_iter().map(|e| e.database).collect())
    }

    fn duplicate(&self, name: String, collision: Collision) -> RegistryError {
        RegistryError::DuplicateDatabase {
            module: self.module.clone(),
            name,
            collision,
        }
    }
}
