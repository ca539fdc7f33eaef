//! The immutable source-set graph for one module.
//!
//! Source sets are stored in an arena in declaration order and reference each
//! other by [`SourceSetId`]. The graph is built once per resolution pass from
//! the host's description and never mutated afterwards.

use std::collections::HashMap;

use crate::error::{EdgeKind, GraphError};
use crate::id::SourceSetId;

/// Directories another module contributes to a source set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDependency {
    /// Name of the module depended on.
    pub module: String,
    /// Directories contributed by that module, in declaration order.
    pub directories: Vec<String>,
}

/// A named source set with its declared directories and outgoing edges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSet {
    /// The source set name, e.g. `commonMain`.
    pub name: String,
    /// Directories declared by this source set, in declaration order.
    pub directories: Vec<String>,
    /// Source sets this one extends, in declaration order.
    pub extends: Vec<SourceSetId>,
    /// Module dependencies, in declaration order.
    pub dependencies: Vec<ModuleDependency>,
}

/// An immutable graph of source sets belonging to a single module.
#[derive(Debug, Clone)]
pub struct SourceSetGraph {
    module: String,
    sets: Vec<SourceSet>,
    by_name: HashMap<String, SourceSetId>,
}

impl SourceSetGraph {
    /// Starts building a graph for the named module.
    pub fn builder(module: impl Into<String>) -> SourceSetGraphBuilder {
        SourceSetGraphBuilder::new(module)
    }

    /// Returns the name of the module this graph describes.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Looks up a source set id by name.
    pub fn id(&self, name: &str) -> Option<SourceSetId> {
        self.by_name.get(name).copied()
    }

    /// Returns the source set for the given id.
    ///
    /// # Panics
    ///
    /// Panics if the id was not produced by this graph.
    pub fn get(&self, id: SourceSetId) -> &SourceSet {
        &self.sets[id.index()]
    }

    /// Looks up a source set by name.
    pub fn source_set(&self, name: &str) -> Option<&SourceSet> {
        self.id(name).map(|id| self.get(id))
    }

    /// Iterates over all source sets in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (SourceSetId, &SourceSet)> {
        self.sets
            .iter()
            .enumerate()
            .map(|(i, set)| (SourceSetId::from_raw(i as u32), set))
    }

    /// Returns the number of declared source sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns `true` if no source sets were declared.
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Collects source-set declarations and edges, then validates them into a
/// [`SourceSetGraph`].
///
/// Edges may be added before the source sets they reference are declared;
/// references are only checked by [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct SourceSetGraphBuilder {
    module: String,
    declared: Vec<(String, Vec<String>)>,
    extends: Vec<(String, String)>,
    dependencies: Vec<(String, ModuleDependency)>,
}

impl SourceSetGraphBuilder {
    /// Creates an empty builder for the named module.
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            declared: Vec::new(),
            extends: Vec::new(),
            dependencies: Vec::new(),
        }
    }

    /// Declares a source set with its directories.
    pub fn source_set<I, S>(&mut self, name: impl Into<String>, directories: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declared.push((
            name.into(),
            directories.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Records that `child` extends `parent`.
    ///
    /// Multiple parents of the same child are walked in the order they are added.
    pub fn extends(&mut self, child: impl Into<String>, parent: impl Into<String>) -> &mut Self {
        self.extends.push((child.into(), parent.into()));
        self
    }

    /// Records that `source_set` depends on `module`, which contributes `directories`.
    pub fn depends_on_module<I, S>(
        &mut self,
        source_set: impl Into<String>,
        module: impl Into<String>,
        directories: I,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.push((
            source_set.into(),
            ModuleDependency {
                module: module.into(),
                directories: directories.into_iter().map(Into::into).collect(),
            },
        ));
        self
    }

    /// Validates all declarations and edges and produces the graph.
    pub fn build(self) -> Result<SourceSetGraph, GraphError> {
        let mut sets = Vec::with_capacity(self.declared.len());
        let mut by_name = HashMap::with_capacity(self.declared.len());

        for (name, directories) in self.declared {
            let id = SourceSetId::from_raw(sets.len() as u32);
            if by_name.insert(name.clone(), id).is_some() {
                return Err(GraphError::DuplicateSourceSet {
                    module: self.module,
                    name,
                });
            }
            sets.push(SourceSet {
                name,
                directories,
                extends: Vec::new(),
                dependencies: Vec::new(),
            });
        }

        let lookup = |edge: EdgeKind, from: &str, to: &str| {
            by_name
                .get(to)
                .copied()
                .ok_or_else(|| GraphError::UndeclaredSourceSet {
                    module: self.module.clone(),
                    edge,
                    from: from.to_string(),
                    to: to.to_string(),
                })
        };

        for (child, parent) in &self.extends {
            let child_id = lookup(EdgeKind::Extends, parent, child)?;
            let parent_id = lookup(EdgeKind::Extends, child, parent)?;
            sets[child_id.index()].extends.push(parent_id);
        }

        for (source_set, dependency) in self.dependencies {
            let id = lookup(EdgeKind::ModuleDependency, &dependency.module, &source_set)?;
            sets[id.index()].dependencies.push(dependency);
        }

        tracing::trace!(
            module = %self.module,
            source_sets = sets.len(),
            "built source-set graph"
        );

        Ok(SourceSetGraph {
            module: self.module,
            sets,
            by_name,
        })
    }
}
