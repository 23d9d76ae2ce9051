//! Catalog path naming
//!
//! Maps `(root, language, section)` to the container path
//! `<root>/<language>/<section>.<ext>`.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{LocaleError, Result};

/// Default container extension
pub const DEFAULT_EXTENSION: &str = "json";

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-][A-Za-z0-9_.-]*$").expect("valid name pattern"));

/// Location of a catalog on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogLayout {
    root: PathBuf,
    extension: String,
}

impl CatalogLayout {
    /// Layout with the default container extension
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_extension(root, DEFAULT_EXTENSION)
    }

    pub fn with_extension(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        Self {
            root: root.into(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Container extension, without the leading dot
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn language_dir(&self, lang: &str) -> PathBuf {
        self.root.join(lang)
    }

    /// Path of the container holding `section` for `lang`
    pub fn section_path(&self, section: &str, lang: &str) -> PathBuf {
        self.language_dir(lang)
            .join(format!("{}.{}", section, self.extension))
    }
}

/// Reject names that would escape the catalog hierarchy or collide with hidden files
pub fn validate_name(kind: &'static str, name: &str) -> Result<()> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(LocaleError::InvalidName {
            kind,
            name: name.to_string(),
        })
    }
}
