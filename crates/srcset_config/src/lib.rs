//! Parsing and validation of `srcset.toml` project descriptions.
//!
//! This crate reads the project description file and produces a strongly-typed
//! [`ProjectConfig`], then turns each module into a [`ModulePlan`]: the
//! module's source-set graph, the variants to resolve and the databases to
//! register.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod plan;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use plan::{plan_module, DatabaseSpec, ModulePlan};
pub use types::*;
