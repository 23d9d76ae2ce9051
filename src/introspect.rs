//! Catalog introspection
//!
//! Discovers the language set (immediate subdirectories of the root) and the
//! section set (containers inside the first language) from the filesystem.

use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::error::{LocaleError, Result};
use crate::paths::CatalogLayout;
use crate::schema::CatalogSchema;

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|s| s.starts_with('.'))
        .unwrap_or(true)
}

/// Names of the language directories under `root`, sorted
pub fn discover_languages(root: &Path) -> Result<Vec<String>> {
    if !root.is_dir() {
        return Err(LocaleError::LocalDoesNotExist {
            path: root.to_path_buf(),
        });
    }

    let mut languages = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_dir() || is_hidden(&entry) {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            languages.push(name.to_string());
        }
    }
    languages.sort();
    Ok(languages)
}

/// Section names found in `lang`'s directory, extension stripped, sorted
pub fn discover_sections(layout: &CatalogLayout, lang: &str) -> Result<Vec<String>> {
    let mut sections = Vec::new();
    for entry in WalkDir::new(layout.language_dir(lang))
        .min_depth(1)
        .max_depth(1)
    {
        let entry = entry?;
        if !entry.file_type().is_file() || is_hidden(&entry) {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(layout.extension()) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            sections.push(stem.to_string());
        }
    }
    sections.sort();
    Ok(sections)
}

/// Build the schema snapshot: all languages, sections of the first language
pub fn discover_schema(layout: &CatalogLayout) -> Result<CatalogSchema> {
    let languages = discover_languages(layout.root())?;
    let sections = match languages.first() {
        Some(first) => discover_sections(layout, first)?,
        None => Vec::new(),
    };
    Ok(CatalogSchema::new(languages, sections))
}
