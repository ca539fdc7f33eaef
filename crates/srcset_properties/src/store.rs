//! Reading and writing a module's properties file on disk.
//!
//! Each module owns `<project>/.idea/srcset/<module>/srcset.properties`. The
//! file is rewritten only when the freshly encoded content differs from what
//! is already there, so downstream tooling watching the file is not
//! invalidated by no-op runs.

use std::path::{Path, PathBuf};

use crate::codec;
use crate::database::PropertiesFile;
use crate::error::{CodecError, StoreError};

/// Tool-private metadata directory, relative to the project root.
pub const METADATA_DIR: &str = ".idea/srcset";

/// Name of the properties file within a module's metadata directory.
pub const PROPERTIES_FILE_NAME: &str = "srcset.properties";

/// Result of [`PropertiesStore::write_if_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The file was missing or different and has been written.
    Written,
    /// The file already held identical content; nothing was touched.
    Unchanged,
}

/// Location of one module's properties file.
#[derive(Debug, Clone)]
pub struct PropertiesStore {
    dir: PathBuf,
}

impl PropertiesStore {
    /// Creates a store for `module` under the project root.
    pub fn for_module(project_root: &Path, module: &str) -> Self {
        Self {
            dir: project_root.join(METADATA_DIR).join(module),
        }
    }

    /// Creates a store rooted at an explicit directory.
    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the full path of the properties file.
    pub fn path(&self) -> PathBuf {
        self.dir.join(PROPERTIES_FILE_NAME)
    }

    /// Loads and decodes the stored properties file.
    ///
    /// An absent file is "no prior state" and yields `Ok(None)`. A file that
    /// exists but does not decode is an error.
    pub fn load(&self) -> Result<Option<PropertiesFile>, StoreError> {
        let path = self.path();
        let Some(bytes) = read_optional(&path)? else {
            return Ok(None);
        };
        let decoded = std::str::from_utf8(&bytes)
            .map_err(|e| CodecError::malformed(e.to_string()))
            .and_then(codec::decode);
        decoded
            .map(Some)
            .map_err(|source| StoreError::Codec { path, source })
    }

    /// Loads the stored file as a comparison baseline.
    ///
    /// Like [`load`](Self::load), except that a malformed file is logged and
    /// treated as absent.
    pub fn load_baseline(&self) -> Result<Option<PropertiesFile>, StoreError> {
        match self.load() {
            Err(StoreError::Codec { path, source }) => {
                tracing::warn!(path = %path.display(), error = %source, "ignoring malformed properties file");
                Ok(None)
            }
            other => other,
        }
    }

    /// Returns `true` if the stored file already holds exactly `file`'s encoding.
    pub fn is_up_to_date(&self, file: &PropertiesFile) -> Result<bool, StoreError> {
        let encoded = encode(&self.path(), file)?;
        self.matches(&encoded)
    }

    /// Writes `file` unless the stored content is already byte-identical.
    ///
    /// Creates the metadata directory if it doesn't exist.
    pub fn write_if_changed(&self, file: &PropertiesFile) -> Result<WriteOutcome, StoreError> {
        let path = self.path();
        let encoded = encode(&path, file)?;
        if self.matches(&encoded)? {
            tracing::debug!(path = %path.display(), "properties file unchanged");
            return Ok(WriteOutcome::Unchanged);
        }

        std::fs::create_dir_all(&self.dir).map_err(|e| StoreError::Io {
            path: self.dir.clone(),
            source: e,
        })?;
        std::fs::write(&path, encoded.as_bytes()).map_err(|e| StoreError::Io {
            path: path.clone(),
            source: e,
        })?;
        tracing::debug!(path = %path.display(), "wrote properties file");
        Ok(WriteOutcome::Written)
    }

    fn matches(&self, encoded: &str) -> Result<bool, StoreError> {
        let existing = read_optional(&self.path())?;
        Ok(existing.as_deref() == Some(encoded.as_bytes()))
    }
}

fn encode(path: &Path, file: &PropertiesFile) -> Result<String, StoreError> {
    codec::encode(file).map_err(|source| StoreError::Codec {
        path: path.to_path_buf(),
        source,
    })
}

fn read_optional(path: &Path) -> Result<Option<Vec<u8>>, StoreError> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}
