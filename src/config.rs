//! Configuration management.

use crate::io::import::CollisionPolicy;
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Default configuration file looked up in the working directory.
const DEFAULT_CONFIG_FILE: &str = "labarchive.toml";

/// Runtime configuration for archive operations.
#[derive(Debug, Clone)]
pub struct ArchiveConfig {
    /// Root directory of the file store.
    pub files_root: PathBuf,
    /// Collision handling when restoring files.
    pub collision: CollisionPolicy,
    /// Sections where a malformed record aborts an import.
    pub strict_sections: Vec<String>,
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self {
            files_root: PathBuf::from("files"),
            collision: CollisionPolicy::Skip,
            strict_sections: Vec::new(),
        }
    }
}

/// Configuration file structure (for TOML parsing).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    /// Root directory of the file store.
    pub files_root: Option<String>,
    /// Overwrite existing files when restoring.
    pub overwrite: Option<bool>,
    /// Sections where a malformed record aborts an import.
    pub strict_sections: Option<Vec<String>>,
}

impl ArchiveConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| Error::operation("read_config", e))?;
        let file: ConfigFile = toml::from_str(&raw)
            .map_err(|e| Error::InvalidInput(format!("invalid config file: {e}")))?;
        Ok(Self::default().merged(file))
    }

    /// Loads configuration from an explicit path, or from
    /// `labarchive.toml` in the working directory when present, or defaults.
    ///
    /// # Errors
    ///
    /// Returns an error when an existing configuration file is unreadable.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.exists() {
                    Self::from_file(default)
                } else {
                    Ok(Self::default())
                }
            },
        }
    }

    /// Applies the values of a parsed configuration file.
    fn merged(mut self, file: ConfigFile) -> Self {
        if let Some(root) = file.files_root {
            self.files_root = PathBuf::from(root);
        }
        if let Some(overwrite) = file.overwrite {
            self.collision = if overwrite {
                CollisionPolicy::Overwrite
            } else {
                CollisionPolicy::Skip
            };
        }
        if let Some(sections) = file.strict_sections {
            self.strict_sections = sections;
        }
        self
    }
}
