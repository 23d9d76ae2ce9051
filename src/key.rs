//! Key entries inside a section container
//!
//! Every operation reads the full mapping, mutates it and writes it back
//! wholesale through [`SectionStore`].

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::container::{Entries, OutputFormat};
use crate::error::{LocaleError, Result};
use crate::section::SectionStore;

/// CRUD on the entries of one existing container
#[derive(Debug, Clone)]
pub struct KeyStore {
    section: SectionStore,
}

impl KeyStore {
    /// Bind to the container at `path`, which must already exist
    pub fn open(path: impl Into<PathBuf>, format: OutputFormat) -> Result<Self> {
        let section = SectionStore::new(path, format);
        if !section.exists() {
            return Err(LocaleError::SectionDoesNotExist {
                path: section.path().to_path_buf(),
            });
        }
        Ok(Self { section })
    }

    pub fn path(&self) -> &Path {
        self.section.path()
    }

    pub fn entries(&self) -> Result<Entries> {
        self.section.read_keys()
    }

    pub fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.entries()?.contains_key(key))
    }

    pub fn get(&self, key: &str) -> Result<String> {
        self.entries()?
            .get(key)
            .ok_or_else(|| self.not_found(key))
    }

    /// Overwrite the value of an existing key
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries()?;
        if !entries.contains_key(key) {
            return Err(self.not_found(key));
        }
        entries.insert(key, value);
        debug!(path = %self.path().display(), key, "setting value");
        self.section.write_keys(&entries)?;
        Ok(())
    }

    /// Add `key` with an empty value
    pub fn create(&self, key: &str) -> Result<()> {
        let mut entries = self.entries()?;
        if entries.contains_key(key) {
            return Err(self.already_exists(key));
        }
        entries.insert(key, "");
        debug!(path = %self.path().display(), key, "creating key");
        self.section.write_keys(&entries)?;
        Ok(())
    }

    /// Remove `key`; fails when it is absent
    pub fn delete(&self, key: &str) -> Result<()> {
        let mut entries = self.entries()?;
        if entries.remove(key).is_none() {
            return Err(self.not_found(key));
        }
        debug!(path = %self.path().display(), key, "deleting key");
        self.section.write_keys(&entries)?;
        Ok(())
    }

    /// Move the value of `old_key` to `new_key`, appended at the end
    pub fn rename(&self, new_key: &str, old_key: &str) -> Result<()> {
        let mut entries = self.entries()?;
        let value = entries
            .get(old_key)
            .ok_or_else(|| self.not_found(old_key))?;
        if entries.contains_key(new_key) {
            return Err(self.already_exists(new_key));
        }
        entries.insert(new_key, value);
        entries.remove(old_key);
        debug!(path = %self.path().display(), old_key, new_key, "renaming key");
        self.section.write_keys(&entries)?;
        Ok(())
    }

    fn not_found(&self, key: &str) -> LocaleError {
        LocaleError::KeyNotFound {
            key: key.to_string(),
            path: self.path().to_path_buf(),
        }
    }

    fn already_exists(&self, key: &str) -> LocaleError {
        LocaleError::KeyAlreadyExists {
            key: key.to_string(),
            path: self.path().to_path_buf(),
        }
    }
}
