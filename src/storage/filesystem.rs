//! Directory-backed file store.
//!
//! Stores attached files as plain files under a root directory. Paths
//! coming from records or container entries are untrusted input, so every
//! path is normalized and checked against directory escape before it
//! touches the filesystem.

use crate::io::traits::FileStore;
use crate::{Error, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

/// File store rooted at one directory.
pub struct DirectoryFileStore {
    root: PathBuf,
}

impl DirectoryFileStore {
    /// Creates a store rooted at the given directory, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OperationFailed`] when the root cannot be created.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| Error::operation("create_file_store", e))?;
        Ok(Self { root })
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Normalizes a caller-supplied relative path.
    ///
    /// Backslashes are accepted as separators; absolute paths and any `..`
    /// or `.` component are rejected.
    fn normalize(&self, path: &str) -> Result<PathBuf> {
        if path.is_empty() {
            return Err(Error::InvalidInput("empty file path".to_string()));
        }
        let unified = path.replace('\\', "/");
        let relative = Path::new(&unified);
        let mut normalized = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => normalized.push(part),
                _ => {
                    return Err(Error::InvalidInput(format!(
                        "unsafe file path '{path}'"
                    )));
                },
            }
        }
        Ok(normalized)
    }
}

impl FileStore for DirectoryFileStore {
    fn resolve(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let full = self.normalize(path)?;
        match fs::read(&full) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::operation("read_stored_file", e)),
        }
    }

    fn write(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let full = self.normalize(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::operation("create_store_dir", e))?;
        }
        fs::write(&full, bytes).map_err(|e| Error::operation("write_stored_file", e))
    }

    fn contains(&self, path: &str) -> bool {
        self.normalize(path).map(|full| full.is_file()).unwrap_or(false)
    }
}
