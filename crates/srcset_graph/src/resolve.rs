//! Variant resolution: turning the source-set graph into compilation units.
//!
//! For a variant, the resolver walks the extends graph pre-order from each of
//! the variant's roots, visiting extended sets in declaration order. Each
//! visited set contributes its own directories first, then the directories of
//! its module dependencies. The first occurrence of a path wins; later
//! duplicates are dropped.

use std::collections::HashSet;

use srcset_common::{CompilationUnit, SourceFolder};

use crate::error::ResolveError;
use crate::graph::SourceSetGraph;
use crate::id::SourceSetId;

/// A variant to resolve together with the source sets it is rooted at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRequest {
    /// The variant (compilation unit) name.
    pub name: String,
    /// Root source sets, most specific first. Empty means the source set
    /// named after the variant.
    pub roots: Vec<String>,
}

impl VariantRequest {
    /// A variant rooted at the source set of the same name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roots: Vec::new(),
        }
    }

    /// A variant rooted at an explicit list of source sets.
    pub fn with_roots<I, S>(name: impl Into<String>, roots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            roots: roots.into_iter().map(Into::into).collect(),
        }
    }
}

/// Resolves variants of a single module against its source-set graph.
///
/// The resolver holds no state besides the borrowed graph, so one instance
/// can resolve any number of variants and independent modules can be resolved
/// concurrently.
pub struct Resolver<'g> {
    graph: &'g SourceSetGraph,
}

impl<'g> Resolver<'g> {
    /// Creates a resolver over the given graph.
    pub fn new(graph: &'g SourceSetGraph) -> Self {
        Self { graph }
    }

    /// Resolves a variant rooted at the source set with the same name.
    pub fn resolve(&self, variant: &str) -> Result<CompilationUnit, ResolveError> {
        self.resolve_with_roots(variant, &[variant])
    }

    /// Resolves a variant rooted at the given source sets, most specific first.
    pub fn resolve_with_roots<S: AsRef<str>>(
        &self,
        variant: &str,
        roots: &[S],
    ) -> Result<CompilationUnit, ResolveError> {
        let root_names: Vec<&str> = if roots.is_empty() {
            vec![variant]
        } else {
            roots.iter().map(AsRef::as_ref).collect()
        };

        let root_ids = root_names
            .iter()
            .map(|&root| {
                self.graph
                    .id(root)
                    .ok_or_else(|| ResolveError::UnknownVariant {
                        module: self.graph.module().to_string(),
                        variant: variant.to_string(),
                        root: root.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut walk = Walk::new(self.graph, variant);
        for id in root_ids {
            walk.visit(id)?;
        }

        let unit = CompilationUnit::new(variant, walk.folders);
        tracing::debug!(
            module = %self.graph.module(),
            variant,
            folders = unit.source_folders.len(),
            "resolved compilation unit"
        );
        Ok(unit)
    }

    /// Resolves a request, honoring its explicit roots.
    pub fn resolve_request(&self, request: &VariantRequest) -> Result<CompilationUnit, ResolveError> {
        self.resolve_with_roots(&request.name, &request.roots)
    }

    /// Resolves every request independently, in order.
    ///
    /// A failing variant does not stop the others from being resolved.
    pub fn resolve_all(
        &self,
        requests: &[VariantRequest],
    ) -> Vec<Result<CompilationUnit, ResolveError>> {
        requests.iter().map(|r| self.resolve_request(r)).collect()
    }
}

/// Traversal state for one variant.
struct Walk<'g> {
    graph: &'g SourceSetGraph,
    variant: &'g str,
    on_path: Vec<SourceSetId>,
    visited: HashSet<SourceSetId>,
    seen_paths: HashSet<String>,
    folders: Vec<SourceFolder>,
}

impl<'g> Walk<'g> {
    fn new(graph: &'g SourceSetGraph, variant: &'g str) -> Self {
        Self {
            graph,
            variant,
            on_path: Vec::new(),
            visited: HashSet::new(),
            seen_paths: HashSet::new(),
            folders: Vec::new(),
        }
    }

    fn visit(&mut self, id: SourceSetId) -> Result<(), ResolveError> {
        if let Some(start) = self.on_path.iter().position(|&p| p == id) {
            let mut path: Vec<String> = self.on_path[start..]
                .iter()
                .map(|&p| self.graph.get(p).name.clone())
                .collect();
            path.push(self.graph.get(id).name.clone());
            return Err(ResolveError::Cycle {
                module: self.graph.module().to_string(),
                variant: self.variant.to_string(),
                path,
            });
        }
        if !self.visited.insert(id) {
            return Ok(());
        }

        let graph = self.graph;
        let set = graph.get(id);
        for dir in &set.directories {
            self.push(SourceFolder::local(dir.as_str()));
        }
        for dependency in &set.dependencies {
            for dir in &dependency.directories {
                self.push(SourceFolder::dependency(dir.as_str()));
            }
        }

        self.on_path.push(id);
        for &parent in &set.extends {
            self.visit(parent)?;
        }
        self.on_path.pop();
        Ok(())
    }

    fn push(&mut self, folder: SourceFolder) {
        if self.seen_paths.insert(folder.path().to_string()) {
            self.folders.push(folder);
        } else {
            tracing::trace!(path = folder.path(), "dropping duplicate folder");
        }
    }
}
