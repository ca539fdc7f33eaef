//! Shared pipeline helpers for CLI commands.
//!
//! Contains project root resolution, module selection, and the
//! plan → resolve → register step that every command runs per module.
//! Modules share no state, so they are resolved in parallel.

use std::path::{Path, PathBuf};

use rayon::prelude::*;
use srcset_config::{plan_module, ConfigError, ProjectConfig, CONFIG_FILE_NAME};
use srcset_graph::{ResolveError, Resolver};
use srcset_properties::{DatabaseRegistry, PropertiesFile, RegistryError};

use crate::GlobalArgs;

/// Why a module could not be resolved.
///
/// The whole module is abandoned; nothing is written for it.
#[derive(Debug, thiserror::Error)]
pub enum ModuleError {
    /// The module's configuration or source-set graph is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// One or more variants failed to resolve.
    #[error("{}", join_errors(.0))]
    Variants(Vec<ResolveError>),

    /// A database could not be registered.
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

fn join_errors(errors: &[ResolveError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

/// The result of resolving one module.
#[derive(Debug)]
pub struct ModuleOutcome {
    /// The module name.
    pub module: String,
    /// The resolved properties, or why resolution failed.
    pub result: Result<PropertiesFile, ModuleError>,
}

/// Walks up from `start` looking for the nearest directory containing `srcset.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE_NAME} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root directory from global CLI args.
///
/// If `--config` is specified, uses that path (file → parent dir, dir → itself).
/// Otherwise walks up from the current directory looking for `srcset.toml`.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            Ok(p.parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        find_project_root(&std::env::current_dir()?)
    }
}

/// Returns the requested module names, or every module when none are given.
pub fn select_modules(config: &ProjectConfig, requested: &[String]) -> Result<Vec<String>, ConfigError> {
    if requested.is_empty() {
        return Ok(config.module_names().map(str::to_string).collect());
    }
    for name in requested {
        if config.module(name).is_none() {
            return Err(ConfigError::UnknownModule(name.clone()));
        }
    }
    Ok(requested.to_vec())
}

/// Plans, resolves and registers a single module.
///
/// Every declared database receives the full list of resolved variants. If
/// any variant fails, all failures are reported and the module yields no
/// properties.
pub fn resolve_module(config: &ProjectConfig, module: &str) -> Result<PropertiesFile, ModuleError> {
    let plan = plan_module(config, module)?;
    let resolver = Resolver::new(&plan.graph);

    let mut units = Vec::with_capacity(plan.variants.len());
    let mut failures = Vec::new();
    for result in resolver.resolve_all(&plan.variants) {
        match result {
            Ok(unit) => units.push(unit),
            Err(e) => failures.push(e),
        }
    }
    if !failures.is_empty() {
        return Err(ModuleError::Variants(failures));
    }

    let mut registry = DatabaseRegistry::new(plan.name.as_str());
    for db in &plan.databases {
        registry.add_database(
            db.name.as_str(),
            db.package_name.as_str(),
            db.output_directory.as_str(),
            units.clone(),
        )?;
    }
    tracing::debug!(
        module,
        units = units.len(),
        databases = registry.len(),
        "resolved module"
    );
    Ok(registry.into_properties_file())
}

/// Resolves the given modules in parallel, returning outcomes in input order.
pub fn resolve_modules(config: &ProjectConfig, modules: &[String]) -> Vec<ModuleOutcome> {
    modules
        .par_iter()
        .map(|module| ModuleOutcome {
            module: module.clone(),
            result: resolve_module(config, module),
        })
        .collect()
}
