//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use std::path::Path;

/// Name of the project description file at the project root.
pub const CONFIG_FILE_NAME: &str = "srcset.toml";

/// Loads and validates a `srcset.toml` configuration from a project directory.
///
/// Reads `<project_dir>/srcset.toml`, parses it, and validates required fields.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    let config_path = project_dir.join(CONFIG_FILE_NAME);
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `srcset.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validates that required fields are present and configuration values are consistent.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.project.name.is_empty() {
        return Err(ConfigError::MissingField("project.name".to_string()));
    }

    for (name, module) in &config.modules {
        if module.path.as_deref() == Some("") {
            return Err(ConfigError::ValidationError(format!(
                "module '{name}' has an empty path"
            )));
        }
        if module.path.as_deref().is_some_and(|p| p.starts_with('/')) {
            return Err(ConfigError::ValidationError(format!(
                "module '{name}' path must be relative to the project root"
            )));
        }

        for (set_name, set) in &module.source_sets {
            for dependency in &set.dependencies {
                if dependency == name {
                    return Err(ConfigError::ValidationError(format!(
                        "source set '{set_name}' of module '{name}' depends on its own module"
                    )));
                }
                if !config.modules.contains_key(dependency) {
                    return Err(ConfigError::UnknownModule(dependency.clone()));
                }
            }
        }

        for variant in &module.variants {
            if variant.name().is_empty() {
                return Err(ConfigError::MissingField(format!(
                    "modules.{name}.variants.name"
                )));
            }
        }

        if !module.databases.is_empty() && module.variants.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "module '{name}' declares databases but no variants"
            )));
        }

        for database in &module.databases {
            if database.name.is_empty() {
                return Err(ConfigError::MissingField(format!(
                    "modules.{name}.databases.name"
                )));
            }
            if database.package_name.is_none() && config.project.group.is_none() {
                return Err(ConfigError::MissingField("project.group".to_string()));
            }
        }
    }
    Ok(())
}
