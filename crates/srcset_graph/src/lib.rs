//! Source-set graph model and compilation unit resolution.
//!
//! A [`SourceSetGraph`] holds the raw facts a host build describes for one
//! module: named source sets, the directories each declares, the sets each
//! one extends, and the other modules it depends on. The [`Resolver`] walks
//! that graph per variant and produces an ordered, deduplicated
//! [`CompilationUnit`](srcset_common::CompilationUnit).

#![warn(missing_docs)]

pub mod error;
pub mod graph;
pub mod id;
pub mod resolve;

pub use error::{GraphError, ResolveError};
pub use graph::{ModuleDependency, SourceSet, SourceSetGraph, SourceSetGraphBuilder};
pub use id::SourceSetId;
pub use resolve::{Resolver, VariantRequest};
