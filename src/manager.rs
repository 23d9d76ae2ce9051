//! Localization Manager
//!
//! Orchestrates the per-language stores so that every language keeps the
//! same sections and every section keeps the same keys.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use crate::container::{Entries, OutputFormat};
use crate::error::{LocaleError, Result};
use crate::fanout::{apply_all, fan_out, FanOut};
use crate::introspect;
use crate::key::KeyStore;
use crate::language::LanguageStore;
use crate::paths::{validate_name, CatalogLayout, DEFAULT_EXTENSION};
use crate::schema::CatalogSchema;
use crate::section::SectionStore;

/// Options for opening a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOptions {
    /// Container extension, without the leading dot
    pub extension: String,
    /// How containers are written
    pub output_format: OutputFormat,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            extension: DEFAULT_EXTENSION.to_string(),
            output_format: OutputFormat::Pretty,
        }
    }
}

/// The localization catalog manager
#[derive(Debug)]
pub struct LocalizationManager {
    layout: CatalogLayout,
    format: OutputFormat,
    /// Cached inventory; a snapshot of the filesystem, see [`Self::refresh`]
    schema: CatalogSchema,
}

impl LocalizationManager {
    /// Open an existing catalog root with default options
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_options(root, CatalogOptions::default())
    }

    pub fn with_options(root: impl AsRef<Path>, options: CatalogOptions) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(LocaleError::LocalDoesNotExist {
                path: root.to_path_buf(),
            });
        }
        let layout = CatalogLayout::with_extension(root, options.extension);
        let schema = introspect::discover_schema(&layout)?;
        debug!(
            root = %root.display(),
            languages = schema.languages.len(),
            sections = schema.sections.len(),
            "opened catalog"
        );
        Ok(Self {
            layout,
            format: options.output_format,
            schema,
        })
    }

    pub fn root(&self) -> &Path {
        self.layout.root()
    }

    pub fn layout(&self) -> &CatalogLayout {
        &self.layout
    }

    pub fn schema(&self) -> &CatalogSchema {
        &self.schema
    }

    /// Re-read the inventory from disk, discarding the cached snapshot
    pub fn refresh(&mut self) -> Result<()> {
        self.schema = introspect::discover_schema(&self.layout)?;
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn languages(&self) -> &[String] {
        &self.schema.languages
    }

    pub fn sections(&self) -> &[String] {
        &self.schema.sections
    }

    /// Every section's entries for `lang`
    pub fn keys(&self, lang: &str) -> Result<BTreeMap<String, Entries>> {
        self.schema.require_language(lang)?;
        let mut keys = BTreeMap::new();
        for section in &self.schema.sections {
            let entries = self.section_store(section, lang).read_keys()?;
            keys.insert(section.clone(), entries);
        }
        Ok(keys)
    }

    /// The value of `key` in every language
    ///
    /// The key must exist in every language; one missing value fails the whole call.
    pub fn key(&self, key: &str, section: &str) -> Result<BTreeMap<String, String>> {
        self.require_section(section)?;
        let mut values = BTreeMap::new();
        for lang in &self.schema.languages {
            let value = self.key_store(section, lang)?.get(key)?;
            values.insert(lang.clone(), value);
        }
        Ok(values)
    }

    // =========================================================================
    // Languages
    // =========================================================================

    /// Create a language, replicating the existing sections and keys with empty values
    pub fn create_language(&mut self, lang: &str) -> Result<FanOut> {
        validate_name("language", lang)?;
        let store = LanguageStore::new(self.root(), &self.schema.languages)?;

        // Read the template before touching the disk
        let template: Vec<(String, Entries)> = match self.schema.reference_language() {
            Some(reference) if !self.schema.sections.is_empty() => self
                .keys(reference)?
                .into_iter()
                .map(|(section, entries)| (section, entries.blanked()))
                .collect(),
            _ => Vec::new(),
        };
        if self.layout.language_dir(lang).exists() {
            return Err(LocaleError::LangAlreadyExists(lang.to_string()));
        }

        store.create(lang)?;
        self.schema.add_language(lang);

        if template.is_empty() {
            info!(lang, "created language");
            return Ok(FanOut::single("create_language", lang));
        }

        let sections: Vec<String> = template.iter().map(|(s, _)| s.clone()).collect();
        let mut step = |section: &str| -> Result<()> {
            let store = self.section_store(section, lang);
            store.create()?;
            if let Some((_, entries)) = template.iter().find(|(s, _)| s == section) {
                store.write_keys(entries)?;
            }
            Ok(())
        };
        // The new directory is already on disk, so any failure from here is partial
        apply_all("create_language", &sections, &mut step).map_err(|err| match err {
            LocaleError::PartiallyApplied { .. } => err,
            source => LocaleError::PartiallyApplied {
                operation: "create_language".to_string(),
                applied: vec![lang.to_string()],
                failed: sections[0].clone(),
                source: Box::new(source),
            },
        })
    }

    pub fn rename_language(&mut self, new_lang: &str, old_lang: &str) -> Result<FanOut> {
        validate_name("language", new_lang)?;
        LanguageStore::new(self.root(), &self.schema.languages)?.rename(new_lang, old_lang)?;
        self.schema.rename_language(new_lang, old_lang);
        info!(old_lang, new_lang, "renamed language");
        Ok(FanOut::single("rename_language", new_lang))
    }

    /// Delete a language directory and all of its containers
    pub fn delete_language(&mut self, lang: &str) -> Result<FanOut> {
        LanguageStore::new(self.root(), &self.schema.languages)?.delete(lang)?;
        self.schema.remove_language(lang);
        if self.schema.languages.is_empty() {
            self.schema.sections.clear();
        }
        info!(lang, "deleted language");
        Ok(FanOut::single("delete_language", lang))
    }

    // =========================================================================
    // Sections
    // =========================================================================

    /// Create an empty section container in every language
    pub fn create_section(&mut self, section: &str) -> Result<FanOut> {
        validate_name("section", section)?;
        if self.schema.languages.is_empty() {
            return Err(LocaleError::NoLanguages {
                path: self.root().to_path_buf(),
            });
        }

        let outcome = fan_out(
            "create_section",
            &self.schema.languages,
            |lang| {
                let path = self.layout.section_path(section, lang);
                if path.exists() {
                    Err(LocaleError::SectionAlreadyExists { path })
                } else {
                    Ok(())
                }
            },
            |lang| self.section_store(section, lang).create().map(|_| ()),
        )?;
        self.schema.add_section(section);
        Ok(outcome)
    }

    pub fn delete_section(&mut self, section: &str) -> Result<FanOut> {
        self.require_section(section)?;
        let outcome = fan_out(
            "delete_section",
            &self.schema.languages,
            |lang| self.require_container(section, lang),
            |lang| self.section_store(section, lang).delete(),
        )?;
        self.schema.remove_section(section);
        Ok(outcome)
    }

    pub fn rename_section(&mut self, new_section: &str, old_section: &str) -> Result<FanOut> {
        validate_name("section", new_section)?;
        self.require_section(old_section)?;
        if self.schema.has_section(new_section) {
            return Err(LocaleError::SectionAlreadyExists {
                path: self.layout.section_path(new_section, "*"),
            });
        }
        let outcome = fan_out(
            "rename_section",
            &self.schema.languages,
            |lang| {
                let target = self.layout.section_path(new_section, lang);
                if target.exists() {
                    return Err(LocaleError::SectionAlreadyExists { path: target });
                }
                self.require_container(old_section, lang)
            },
            |lang| {
                self.section_store(old_section, lang)
                    .rename(self.layout.section_path(new_section, lang))
            },
        )?;
        self.schema.rename_section(new_section, old_section);
        Ok(outcome)
    }

    // =========================================================================
    // Keys
    // =========================================================================

    /// Set the value of `key` for a single language
    pub fn set_value(&mut self, key: &str, value: &str, section: &str, lang: &str) -> Result<FanOut> {
        self.schema.require_language(lang)?;
        self.require_section(section)?;
        self.key_store(section, lang)?.set(key, value)?;
        debug!(key, section, lang, "value set");
        Ok(FanOut::single("set_value", lang))
    }

    /// Add `key` with an empty value to `section` in every language
    pub fn create_key(&mut self, key: &str, section: &str) -> Result<FanOut> {
        self.require_section(section)?;
        fan_out(
            "create_key",
            &self.schema.languages,
            |lang| {
                let store = self.key_store(section, lang)?;
                if store.exists(key)? {
                    return Err(LocaleError::KeyAlreadyExists {
                        key: key.to_string(),
                        path: store.path().to_path_buf(),
                    });
                }
                Ok(())
            },
            |lang| self.key_store(section, lang)?.create(key),
        )
    }

    pub fn rename_key(&mut self, new_key: &str, old_key: &str, section: &str) -> Result<FanOut> {
        self.require_section(section)?;
        fan_out(
            "rename_key",
            &self.schema.languages,
            |lang| {
                let store = self.key_store(section, lang)?;
                let entries = store.entries()?;
                if !entries.contains_key(old_key) {
                    return Err(LocaleError::KeyNotFound {
                        key: old_key.to_string(),
                        path: store.path().to_path_buf(),
                    });
                }
                if entries.contains_key(new_key) {
                    return Err(LocaleError::KeyAlreadyExists {
                        key: new_key.to_string(),
                        path: store.path().to_path_buf(),
                    });
                }
                Ok(())
            },
            |lang| self.key_store(section, lang)?.rename(new_key, old_key),
        )
    }

    pub fn delete_key(&mut self, key: &str, section: &str) -> Result<FanOut> {
        self.require_section(section)?;
        fan_out(
            "delete_key",
            &self.schema.languages,
            |lang| {
                let store = self.key_store(section, lang)?;
                if !store.exists(key)? {
                    return Err(LocaleError::KeyNotFound {
                        key: key.to_string(),
                        path: store.path().to_path_buf(),
                    });
                }
                Ok(())
            },
            |lang| self.key_store(section, lang)?.delete(key),
        )
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    pub(crate) fn section_store(&self, section: &str, lang: &str) -> SectionStore {
        SectionStore::new(self.layout.section_path(section, lang), self.format)
    }

    fn key_store(&self, section: &str, lang: &str) -> Result<KeyStore> {
        KeyStore::open(self.layout.section_path(section, lang), self.format)
    }

    fn require_section(&self, section: &str) -> Result<()> {
        if self.schema.has_section(section) {
            Ok(())
        } else {
            Err(LocaleError::SectionDoesNotExist {
                path: self.layout.section_path(section, "*"),
            })
        }
    }

    fn require_container(&self, section: &str, lang: &str) -> Result<()> {
        let store = self.section_store(section, lang);
        if store.exists() {
            Ok(())
        } else {
            Err(LocaleError::SectionDoesNotExist {
                path: store.path().to_path_buf(),
            })
        }
    }
}
