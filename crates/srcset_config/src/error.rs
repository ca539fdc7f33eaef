//! Error types for configuration loading and validation.

use srcset_graph::{GraphError, ResolveError};

/// Errors that can occur when loading or validating a `srcset.toml` configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the configuration file.
    #[error("failed to read configuration: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    /// A referenced module name does not exist in the configuration.
    #[error("unknown module '{0}'")]
    UnknownModule(String),

    /// A required field is missing from the configuration.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// A configuration value failed validation.
    #[error("validation error: {0}")]
    ValidationError(String),

    /// A module's source sets do not form a valid graph.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// A dependency module's source sets could not be walked.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
