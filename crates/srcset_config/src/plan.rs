//! Module planning: turning a module's configuration into resolver input.
//!
//! A [`ModulePlan`] carries everything needed to resolve one module without
//! looking at the configuration again: the validated source-set graph, the
//! variants to resolve and the databases to register, with the package-name
//! and output-directory defaults already applied.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use srcset_graph::{
    GraphError, ResolveError, Resolver, SourceSetGraph, SourceSetGraphBuilder, VariantRequest,
};

use crate::error::ConfigError;
use crate::types::{ModuleConfig, ProjectConfig};

/// Source sets tried, in order, when a dependency module has no source set
/// matching the depending one.
const FALLBACK_SOURCE_SETS: [&str; 2] = ["main", "commonMain"];

/// A database with all defaults resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSpec {
    /// The database name.
    pub name: String,
    /// Package of the generated code.
    pub package_name: String,
    /// Output directory, module-relative.
    pub output_directory: String,
}

/// Everything needed to resolve one module.
#[derive(Debug)]
pub struct ModulePlan {
    /// The module name.
    pub name: String,
    /// The module's source-set graph.
    pub graph: SourceSetGraph,
    /// Variants to resolve, in output order.
    pub variants: Vec<VariantRequest>,
    /// Databases to register, in declaration order.
    pub databases: Vec<DatabaseSpec>,
}

/// Builds the plan for a single module.
///
/// A module dependency contributes the folders of the dependency's source set
/// with the same name, or of its `main`/`commonMain` set if it has no such
/// set, walked through that set's `extends` chain. The dependency's own module
/// dependencies are not followed. Every folder is expressed relative to the
/// depending module's directory, the same frame as its local folders.
pub fn plan_module(config: &ProjectConfig, module_name: &str) -> Result<ModulePlan, ConfigError> {
    let module = config
        .module(module_name)
        .ok_or_else(|| ConfigError::UnknownModule(module_name.to_string()))?;
    let module_dir = module.path_or(module_name);

    let mut builder = SourceSetGraph::builder(module_name);
    declare_local_source_sets(&mut builder, module);

    let mut dependency_graphs: HashMap<&str, SourceSetGraph> = HashMap::new();
    for (set_name, set) in &module.source_sets {
        for dependency in &set.dependencies {
            let dep_module = config
                .module(dependency)
                .ok_or_else(|| ConfigError::UnknownModule(dependency.clone()))?;
            let dep_graph = match dependency_graphs.entry(dependency.as_str()) {
                Entry::Occupied(entry) => entry.into_mut(),
                Entry::Vacant(entry) => entry.insert(local_graph(dependency, dep_module)?),
            };
            let dep_dir = dep_module.path_or(dependency);
            let directories: Vec<String> = dependency_directories(dep_graph, set_name)?
                .iter()
                .map(|dir| relative_to(module_dir, dep_dir, dir))
                .collect();
            builder.depends_on_module(set_name.as_str(), dependency.as_str(), directories);
        }
    }
    let graph = builder.build()?;

    let variants = module
        .variants
        .iter()
        .map(|v| VariantRequest::with_roots(v.name(), v.roots().iter().cloned()))
        .collect();

    let databases = module
        .databases
        .iter()
        .map(|db| {
            let package_name = db
                .package_name
                .clone()
                .or_else(|| config.project.group.clone())
                .ok_or_else(|| ConfigError::MissingField("project.group".to_string()))?;
            Ok(DatabaseSpec {
                name: db.name.clone(),
                package_name,
                output_directory: db.output_directory_or_default(),
            })
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    tracing::debug!(
        module = module_name,
        source_sets = graph.len(),
        variants = module.variants.len(),
        databases = databases.len(),
        "planned module"
    );

    Ok(ModulePlan {
        name: module_name.to_string(),
        graph,
        variants,
        databases,
    })
}

fn declare_local_source_sets(builder: &mut SourceSetGraphBuilder, module: &ModuleConfig) {
    for (set_name, set) in &module.source_sets {
        builder.source_set(set_name.as_str(), set.directories_for(set_name));
        for parent in &set.extends {
            builder.extends(set_name.as_str(), parent.as_str());
        }
    }
}

/// A module's graph without its module dependencies.
fn local_graph(name: &str, module: &ModuleConfig) -> Result<SourceSetGraph, GraphError> {
    let mut builder = SourceSetGraph::builder(name);
    declare_local_source_sets(&mut builder, module);
    builder.build()
}

/// Folders, relative to the dependency module, that it contributes to `set_name`.
fn dependency_directories(
    dep_graph: &SourceSetGraph,
    set_name: &str,
) -> Result<Vec<String>, ResolveError> {
    let matched = std::iter::once(set_name)
        .chain(FALLBACK_SOURCE_SETS)
        .find(|name| dep_graph.id(name).is_some());
    let Some(matched) = matched else {
        return Ok(Vec::new());
    };
    let unit = Resolver::new(dep_graph).resolve(matched)?;
    Ok(unit.paths().map(str::to_string).collect())
}

/// Rewrites `dir`, relative to the module at `dep_dir`, to be relative to
/// the module at `from_dir`. Absolute directories are returned unchanged.
fn relative_to(from_dir: &str, dep_dir: &str, dir: &str) -> String {
    if dir.starts_with('/') {
        return dir.to_string();
    }
    let from = normalize(from_dir.split('/'));
    let target = normalize(dep_dir.split('/').chain(dir.split('/')));
    let common = from
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();

    let parts: Vec<&str> = std::iter::repeat("..")
        .take(from.len() - common)
        .chain(target[common..].iter().copied())
        .collect();
    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

fn normalize<'a>(parts: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut out: Vec<&str> = Vec::new();
    for part in parts {
        match part {
            "" | "." => {}
            ".." if out.last().is_some_and(|last| *last != "..") => {
                out.pop();
            }
            _ => out.push(part),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::load_config_from_str;
    use srcset_common::SourceFolder;

    const MULTIPLATFORM: &str = r#"
[project]
name = "sample"
group = "com.example"

[modules.app]
variants = [
    "androidLibDebug",
    { name = "androidLibRelease", roots = ["androidLibRelease", "androidLibMain"] },
    "metadataMain",
]

[modules.app.source_sets.commonMain]
dependencies = ["lib"]

[modules.app.source_sets.androidLibMain]
extends = ["commonMain"]

[modules.app.source_sets.androidLibDebug]
extends = ["androidLibMain"]

[modules.app.source_sets.androidLibRelease]
extends = ["androidLibMain"]

[modules.app.source_sets.metadataMain]
directories = []
extends = ["commonMain"]

[[modules.app.databases]]
name = "CashDatabase"
package_name = "com.squareup.sqldelight.sample"

[[modules.app.databases]]
name = "Analytics"
output_directory = "build/analytics"

[modules.lib]
path = "libs/lib/"

[modules.lib.source_sets.main]
directories = ["src/main/sql", "/abs/shared"]
"#;

    #[test]
    fn plan_builds_graph() {
        let config = load_config_from_str(MULTIPLATFORM).unwrap();
        let plan = plan_module(&config, "app").unwrap();
        assert_eq!(plan.name, "app");
        assert_eq!(plan.graph.len(), 5);

        let unit = Resolver::new(&plan.graph).resolve("androidLibDebug").unwrap();
        let paths: Vec<_> = unit.paths().collect();
        assert_eq!(
            paths,
            vec![
                "src/androidLibDebug/sqldelight",
                "src/androidLibMain/sqldelight",
                "src/commonMain/sqldelight",
                "../libs/lib/src/main/sql",
                "/abs/shared",
            ]
        );
        assert!(unit.source_folders[3].is_dependency());
        assert!(!unit.source_folders[2].is_dependency());
    }

    #[test]
    fn plan_keeps_variant_roots() {
        let config = load_config_from_str(MULTIPLATFORM).unwrap();
        let plan = plan_module(&config, "app").unwrap();
        assert_eq!(plan.variants[0], VariantRequest::new("androidLibDebug"));
        assert_eq!(
            plan.variants[1].roots,
            vec!["androidLibRelease", "androidLibMain"]
        );
        assert_eq!(plan.variants.len(), 3);
    }

    #[test]
    fn plan_applies_database_defaults() {
        let config = load_config_from_str(MULTIPLATFORM).unwrap();
        let plan = plan_module(&config, "app").unwrap();
        assert_eq!(
            plan.databases,
            vec![
                DatabaseSpec {
                    name: "CashDatabase".to_string(),
                    package_name: "com.squareup.sqldelight.sample".to_string(),
                    output_directory: "build/srcset/CashDatabase".to_string(),
                },
                DatabaseSpec {
                    name: "Analytics".to_string(),
                    package_name: "com.example".to_string(),
                    output_directory: "build/analytics".to_string(),
                },
            ]
        );
    }

    #[test]
    fn dependency_prefers_matching_source_set() {
        let toml = r#"
[project]
name = "sample"

[modules.app.source_sets.jvmMain]
dependencies = ["lib"]

[modules.lib.source_sets.main]
[modules.lib.source_sets.jvmMain]
"#;
        let config = load_config_from_str(toml).unwrap();
        let plan = plan_module(&config, "app").unwrap();
        let set = plan.graph.source_set("jvmMain").unwrap();
        assert_eq!(set.dependencies[0].module, "lib");
        assert_eq!(
            set.dependencies[0].directories,
            vec!["../lib/src/jvmMain/sqldelight"]
        );
    }

    #[test]
    fn dependency_without_matching_set_contributes_nothing() {
        let toml = r#"
[project]
name = "sample"

[modules.app.source_sets.jvmMain]
dependencies = ["lib"]

[modules.lib.source_sets.iosMain]
"#;
        let config = load_config_from_str(toml).unwrap();
        let plan = plan_module(&config, "app").unwrap();
        let set = plan.graph.source_set("jvmMain").unwrap();
        assert!(set.dependencies[0].directories.is_empty());
    }

    #[test]
    fn undeclared_extends_surfaces_graph_error() {
        let toml = r#"
[project]
name = "sample"

[modules.app.source_sets.debug]
extends = ["main"]
"#;
        let config = load_config_from_str(toml).unwrap();
        let err = plan_module(&config, "app").unwrap_err();
        assert!(matches!(err, ConfigError::Graph(_)));
    }

    #[test]
    fn unknown_module_errors() {
        let config = load_config_from_str(MULTIPLATFORM).unwrap();
        let err = plan_module(&config, "server").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownModule(ref m) if m == "server"));
    }

    #[test]
    fn dependency_folders_share_the_module_frame() {
        let toml = r#"
[project]
name = "sample"

[modules.app]
path = "app"

[modules.app.source_sets.main]
directories = ["src/main/sqldelight", "lib/src/main/sqldelight"]
dependencies = ["lib"]

[modules.lib]
path = "lib"

[modules.lib.source_sets.main]
"#;
        let config = load_config_from_str(toml).unwrap();
        let plan = plan_module(&config, "app").unwrap();
        let unit = Resolver::new(&plan.graph).resolve("main").unwrap();
        assert_eq!(
            unit.source_folders,
            vec![
                SourceFolder::local("src/main/sqldelight"),
                SourceFolder::local("lib/src/main/sqldelight"),
                SourceFolder::dependency("../lib/src/main/sqldelight"),
            ]
        );
    }

    #[test]
    fn dependency_contributes_its_extends_chain() {
        let toml = r#"
[project]
name = "sample"

[modules.app.source_sets.jvmMain]
dependencies = ["lib"]

[modules.lib.source_sets.commonMain]
dependencies = ["core"]

[modules.lib.source_sets.jvmMain]
extends = ["commonMain"]

[modules.core.source_sets.commonMain]
"#;
        let config = load_config_from_str(toml).unwrap();
        let plan = plan_module(&config, "app").unwrap();
        let unit = Resolver::new(&plan.graph).resolve("jvmMain").unwrap();
        assert_eq!(
            unit.source_folders,
            vec![
                SourceFolder::local("src/jvmMain/sqldelight"),
                SourceFolder::dependency("../lib/src/jvmMain/sqldelight"),
                SourceFolder::dependency("../lib/src/commonMain/sqldelight"),
            ]
        );
    }

    #[test]
    fn cyclic_dependency_module_errors() {
        let toml = r#"
[project]
name = "sample"

[modules.app.source_sets.main]
dependencies = ["lib"]

[modules.lib.source_sets.main]
extends = ["base"]

[modules.lib.source_sets.base]
extends = ["main"]
"#;
        let config = load_config_from_str(toml).unwrap();
        let err = plan_module(&config, "app").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Resolve(ResolveError::Cycle { ref module, .. }) if module == "lib"
        ));
    }

    #[test]
    fn relative_directories() {
        assert_eq!(relative_to("app", "lib", "src/main"), "../lib/src/main");
        assert_eq!(relative_to(".", "lib", "src/main"), "lib/src/main");
        assert_eq!(relative_to("app", "app/lib", "src"), "lib/src");
        assert_eq!(relative_to("libs/app", "libs/core/", "src"), "../core/src");
        assert_eq!(relative_to("app", ".", "src"), "../src");
        assert_eq!(relative_to("app", "lib", "../shared/sql"), "../shared/sql");
        assert_eq!(relative_to("app", "lib", "/abs/sql"), "/abs/sql");
        assert_eq!(relative_to("app", "app", "."), ".");
    }
}
