//! Section containers
//!
//! A [`SectionStore`] is bound to one container path and manages the
//! container file itself: creation, deletion, renaming and whole-mapping I/O.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::container::{self, Entries, OutputFormat};
use crate::error::{LocaleError, Result};

/// CRUD on a single container file
#[derive(Debug, Clone)]
pub struct SectionStore {
    path: PathBuf,
    format: OutputFormat,
}

impl SectionStore {
    pub fn new(path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Create the container with an empty mapping, returning the bytes written
    pub fn create(&self) -> Result<usize> {
        if self.path.exists() {
            return Err(LocaleError::SectionAlreadyExists {
                path: self.path.clone(),
            });
        }
        debug!(path = %self.path.display(), "creating section container");
        self.write_keys(&Entries::new())
    }

    pub fn delete(&self) -> Result<()> {
        self.ensure_exists()?;
        debug!(path = %self.path.display(), "deleting section container");
        fs::remove_file(&self.path)?;
        Ok(())
    }

    /// Move the container to `new_path`
    pub fn rename(&self, new_path: impl AsRef<Path>) -> Result<()> {
        let new_path = new_path.as_ref();
        if new_path.exists() {
            return Err(LocaleError::SectionAlreadyExists {
                path: new_path.to_path_buf(),
            });
        }
        self.ensure_exists()?;
        debug!(from = %self.path.display(), to = %new_path.display(), "renaming section container");
        fs::rename(&self.path, new_path)?;
        Ok(())
    }

    /// Parse the full key → value mapping
    pub fn read_keys(&self) -> Result<Entries> {
        self.ensure_exists()?;
        let content = fs::read_to_string(&self.path)?;
        container::decode(&content)
    }

    /// Persist the full mapping, replacing the container contents
    pub fn write_keys(&self, entries: &Entries) -> Result<usize> {
        let content = container::encode(entries, self.format)?;
        fs::write(&self.path, &content)?;
        Ok(content.len())
    }

    fn ensure_exists(&self) -> Result<()> {
        if self.exists() {
            Ok(())
        } else {
            Err(LocaleError::SectionDoesNotExist {
                path: self.path.clone(),
            })
        }
    }
}
