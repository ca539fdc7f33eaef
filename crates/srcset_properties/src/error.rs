//! Error types for registration, encoding and persistence.

use std::fmt;
use std::path::PathBuf;

/// What a rejected database collided with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collision {
    /// Another database already uses the same name.
    Name,
    /// Another database already generates the same package into the same directory.
    Target {
        /// The already registered database.
        existing: String,
        /// The shared package name.
        package_name: String,
        /// The shared output directory.
        output_directory: String,
    },
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collision::Name => f.write_str("name is already registered"),
            Collision::Target {
                existing,
                package_name,
                output_directory,
            } => write!(
                f,
                "package '{package_name}' in '{output_directory}' is already generated by '{existing}'"
            ),
        }
    }
}

/// Errors raised while registering databases for a module.
///
/// Any of these aborts processing of the module.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The database name or its package/output pair is already taken.
    #[error("module '{module}': duplicate database '{name}': {collision}")]
    DuplicateDatabase {
        /// The module being registered.
        module: String,
        /// The rejected database.
        name: String,
        /// What it collided with.
        collision: Collision,
    },

    /// Two compilation units of one database share a variant name.
    #[error("module '{module}': database '{database}' has more than one compilation unit named '{unit}'")]
    DuplicateCompilationUnit {
        /// The module being registered.
        module: String,
        /// The rejected database.
        database: String,
        /// The repeated unit name.
        unit: String,
    },

    /// A compilation unit lists the same folder twice.
    #[error("module '{module}': compilation unit '{unit}' of database '{database}' repeats folder '{path}'")]
    DuplicateSourceFolder {
        /// The module being registered.
        module: String,
        /// The rejected database.
        database: String,
        /// The offending unit.
        unit: String,
        /// The repeated folder path.
        path: String,
    },
}

/// Errors raised while encoding or decoding a properties document.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CodecError {
    /// The text is not a structurally valid properties document.
    #[error("malformed properties file: {reason}")]
    Malformed {
        /// Description of the problem.
        reason: String,
    },

    /// The model could not be serialized.
    #[error("failed to encode properties file: {reason}")]
    Encode {
        /// Description of the failure.
        reason: String,
    },
}

impl CodecError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

/// Errors raised while reading or writing the properties file on disk.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// An I/O error occurred while reading or writing the file.
    #[error("properties I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file exists but could not be decoded.
    #[error("{path}: {source}")]
    Codec {
        /// The properties file path.
        path: PathBuf,
        /// The decoding error.
        source: CodecError,
    },
}
