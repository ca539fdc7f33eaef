//! Shared foundational types used across the srcset workspace.
//!
//! This crate provides the resolved-model leaf types ([`SourceFolder`] and
//! [`CompilationUnit`]) produced by the resolver and persisted by the
//! properties codec.

#![warn(missing_docs)]

pub mod folder;
pub mod unit;

pub use folder::SourceFolder;
pub use unit::CompilationUnit;
