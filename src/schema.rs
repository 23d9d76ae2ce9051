//! Catalog schema snapshot
//!
//! The in-memory inventory of languages and sections. Sections are derived
//! from the first language at discovery time; after that the snapshot is
//! only changed by mirroring mutations the manager has applied.

use serde::{Deserialize, Serialize};

use crate::error::{LocaleError, Result};

/// Languages and sections known to a catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSchema {
    pub languages: Vec<String>,
    pub sections: Vec<String>,
}

impl CatalogSchema {
    pub fn new(languages: Vec<String>, sections: Vec<String>) -> Self {
        Self { languages, sections }
    }

    pub fn has_language(&self, lang: &str) -> bool {
        self.languages.iter().any(|l| l == lang)
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.iter().any(|s| s == section)
    }

    /// The language whose containers define the section/key schema
    pub fn reference_language(&self) -> Option<&str> {
        self.languages.first().map(String::as_str)
    }

    pub fn require_language(&self, lang: &str) -> Result<()> {
        if self.has_language(lang) {
            Ok(())
        } else {
            Err(LocaleError::LangDoesNotExist(lang.to_string()))
        }
    }

    pub(crate) fn add_language(&mut self, lang: &str) {
        if !self.has_language(lang) {
            self.languages.push(lang.to_string());
        }
    }

    pub(crate) fn remove_language(&mut self, lang: &str) {
        self.languages.retain(|l| l != lang);
    }

    pub(crate) fn rename_language(&mut self, new_lang: &str, old_lang: &str) {
        rename_in(&mut self.languages, new_lang, old_lang);
    }

    pub(crate) fn add_section(&mut self, section: &str) {
        if !self.has_section(section) {
            self.sections.push(section.to_string());
        }
    }

    pub(crate) fn remove_section(&mut self, section: &str) {
        self.sections.retain(|s| s != section);
    }

    pub(crate) fn rename_section(&mut self, new_section: &str, old_section: &str) {
        rename_in(&mut self.sections, new_section, old_section);
    }
}

fn rename_in(names: &mut [String], new_name: &str, old_name: &str) {
    if let Some(slot) = names.iter_mut().find(|n| n.as_str() == old_name) {
        *slot = new_name.to_string();
    }
}
