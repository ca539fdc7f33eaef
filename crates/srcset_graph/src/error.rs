//! Error types for graph construction and variant resolution.

/// The kind of edge that referenced a source set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// A local "extends" edge.
    Extends,
    /// A module-dependency edge.
    ModuleDependency,
}

impl std::fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EdgeKind::Extends => f.write_str("extends"),
            EdgeKind::ModuleDependency => f.write_str("module dependency"),
        }
    }
}

/// Errors raised while building a [`SourceSetGraph`](crate::SourceSetGraph).
///
/// Any of these aborts resolution for the whole module.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GraphError {
    /// An edge names a source set that was never declared.
    #[error("module '{module}': {edge} edge from '{from}' references undeclared source set '{to}'")]
    UndeclaredSourceSet {
        /// The module whose graph was being built.
        module: String,
        /// The kind of edge.
        edge: EdgeKind,
        /// The source set the edge starts from.
        from: String,
        /// The undeclared source set name.
        to: String,
    },

    /// The same source set name was declared twice.
    #[error("module '{module}': source set '{name}' is declared more than once")]
    DuplicateSourceSet {
        /// The module whose graph was being built.
        module: String,
        /// The duplicated name.
        name: String,
    },
}

/// Errors raised while resolving a single variant.
///
/// These abort resolution for the affected variant only.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The variant's root source set does not exist.
    #[error("module '{module}': variant '{variant}' has no root source set '{root}'")]
    UnknownVariant {
        /// The module being resolved.
        module: String,
        /// The requested variant.
        variant: String,
        /// The missing root source set name.
        root: String,
    },

    /// The extends walk reached a source set already on the current path.
    #[error(
        "module '{}': variant '{}' has a cyclic extends chain: {}",
        .module,
        .variant,
        .path.join(" -> ")
    )]
    Cycle {
        /// The module being resolved.
        module: String,
        /// The requested variant.
        variant: String,
        /// Source set names along the cycle, starting and ending with the same set.
        path: Vec<String>,
    },
}
