//! Language directories

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{LocaleError, Result};

/// CRUD on language directories, checked against a known language list
#[derive(Debug)]
pub struct LanguageStore<'a> {
    root: PathBuf,
    known: &'a [String],
}

impl<'a> LanguageStore<'a> {
    /// Bind to the catalog `root`, which must be a directory
    pub fn new(root: impl AsRef<Path>, known: &'a [String]) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(LocaleError::LocalDoesNotExist {
                path: root.to_path_buf(),
            });
        }
        Ok(Self {
            root: root.to_path_buf(),
            known,
        })
    }

    fn is_known(&self, lang: &str) -> bool {
        self.known.iter().any(|l| l == lang)
    }

    pub fn create(&self, lang: &str) -> Result<()> {
        if self.is_known(lang) {
            return Err(LocaleError::LangAlreadyExists(lang.to_string()));
        }
        debug!(lang, "creating language directory");
        fs::create_dir(self.root.join(lang))?;
        Ok(())
    }

    pub fn rename(&self, new_lang: &str, old_lang: &str) -> Result<()> {
        if self.is_known(new_lang) {
            return Err(LocaleError::LangAlreadyExists(new_lang.to_string()));
        }
        if !self.is_known(old_lang) {
            return Err(LocaleError::LangDoesNotExist(old_lang.to_string()));
        }
        debug!(old_lang, new_lang, "renaming language directory");
        fs::rename(self.root.join(old_lang), self.root.join(new_lang))?;
        Ok(())
    }

    /// Remove every file in the language directory, then the directory itself
    pub fn delete(&self, lang: &str) -> Result<()> {
        if !self.is_known(lang) {
            return Err(LocaleError::LangDoesNotExist(lang.to_string()));
        }
        let dir = self.root.join(lang);
        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            if entry.file_type().is_file() {
                debug!(path = %entry.path().display(), "removing container");
                fs::remove_file(entry.path())?;
            }
        }
        debug!(lang, "removing language directory");
        fs::remove_dir(&dir)?;
        Ok(())
    }
}
