//! The resolved properties model and its persisted form.
//!
//! Resolved [`CompilationUnit`](srcset_common::CompilationUnit)s are grouped
//! into [`Database`]s by a per-module [`DatabaseRegistry`], which enforces
//! name and output uniqueness. The resulting [`PropertiesFile`] is encoded by
//! the [`codec`] into a stable JSON document and written by the
//! [`PropertiesStore`] only when its content actually changed.

#![warn(missing_docs)]

pub mod codec;
pub mod database;
pub mod error;
pub mod registry;
pub mod store;

pub use codec::{decode, encode, SCHEMA_VERSION};
pub use database::{Database, PropertiesFile};
pub use error::{CodecError, Collision, RegistryError, StoreError};
pub use registry::DatabaseRegistry;
pub use store::{PropertiesStore, WriteOutcome, METADATA_DIR, PROPERTIES_FILE_NAME};
