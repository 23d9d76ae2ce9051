//! Consistency audit and reconciliation
//!
//! Scans the catalog on disk (ignoring the manager's cached snapshot) and
//! reports every section container or key that exists in some language but
//! is missing from another. Reconciliation is additive: missing containers
//! and keys are created with empty values, nothing is ever deleted.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use tracing::{info, warn};

use crate::container::Entries;
use crate::error::Result;
use crate::introspect;
use crate::manager::LocalizationManager;

/// One divergence from the schema uniformity invariant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Drift {
    MissingSection {
        language: String,
        section: String,
    },
    MissingKey {
        language: String,
        section: String,
        key: String,
    },
}

impl fmt::Display for Drift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Drift::MissingSection { language, section } => {
                write!(f, "{}: missing section '{}'", language, section)
            }
            Drift::MissingKey { language, section, key } => {
                write!(f, "{}/{}: missing key '{}'", language, section, key)
            }
        }
    }
}

/// Result of scanning every language on disk
#[derive(Debug, Clone, Default, Serialize)]
pub struct AuditReport {
    pub languages: Vec<String>,
    /// Union of sections across all languages
    pub sections: Vec<String>,
    pub drift: Vec<Drift>,
}

impl AuditReport {
    pub fn is_consistent(&self) -> bool {
        self.drift.is_empty()
    }
}

/// Per-language container contents as found on disk
struct Scan {
    languages: Vec<String>,
    containers: BTreeMap<String, BTreeMap<String, Entries>>,
    sections: BTreeSet<String>,
    /// Union of keys per section, in first-seen order
    keys: BTreeMap<String, Vec<String>>,
}

impl Scan {
    fn run(manager: &LocalizationManager) -> Result<Self> {
        let layout = manager.layout();
        let languages = introspect::discover_languages(layout.root())?;
        let mut containers = BTreeMap::new();
        let mut sections = BTreeSet::new();
        let mut keys: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for lang in &languages {
            let mut found = BTreeMap::new();
            for section in introspect::discover_sections(layout, lang)? {
                let entries = manager.section_store(&section, lang).read_keys()?;
                let known = keys.entry(section.clone()).or_default();
                for key in entries.keys() {
                    if !known.iter().any(|k| k == key) {
                        known.push(key.to_string());
                    }
                }
                sections.insert(section.clone());
                found.insert(section, entries);
            }
            containers.insert(lang.clone(), found);
        }

        Ok(Self {
            languages,
            containers,
            sections,
            keys,
        })
    }

    fn drift(&self) -> Vec<Drift> {
        let mut drift = Vec::new();
        for lang in &self.languages {
            let found = &self.containers[lang];
            for section in &self.sections {
                let Some(entries) = found.get(section) else {
                    drift.push(Drift::MissingSection {
                        language: lang.clone(),
                        section: section.clone(),
                    });
                    continue;
                };
                for key in self.keys.get(section).into_iter().flatten() {
                    if !entries.contains_key(key) {
                        drift.push(Drift::MissingKey {
                            language: lang.clone(),
                            section: section.clone(),
                            key: key.clone(),
                        });
                    }
                }
            }
        }
        drift
    }

    fn report(&self) -> AuditReport {
        AuditReport {
            languages: self.languages.clone(),
            sections: self.sections.iter().cloned().collect(),
            drift: self.drift(),
        }
    }
}

impl LocalizationManager {
    /// Compare every language on disk against the union of all sections and keys
    pub fn audit(&self) -> Result<AuditReport> {
        let report = Scan::run(self)?.report();
        if !report.is_consistent() {
            warn!(drift = report.drift.len(), "catalog is not uniform across languages");
        }
        Ok(report)
    }

    /// Create every missing container and key with empty values, then refresh
    ///
    /// Returns the drift that was repaired.
    pub fn reconcile(&mut self) -> Result<AuditReport> {
        let scan = Scan::run(self)?;
        let report = scan.report();

        for lang in &scan.languages {
            let found = &scan.containers[lang];
            for section in &scan.sections {
                let union = scan.keys.get(section).map(Vec::as_slice).unwrap_or_default();
                let store = self.section_store(section, lang);
                match found.get(section) {
                    None => {
                        store.create()?;
                        let blank: Entries = union.iter().map(|k| (k.as_str(), "")).collect();
                        store.write_keys(&blank)?;
                    }
                    Some(entries) if union.iter().any(|k| !entries.contains_key(k)) => {
                        let mut entries = entries.clone();
                        for key in union {
                            if !entries.contains_key(key) {
                                entries.insert(key.as_str(), "");
                            }
                        }
                        store.write_keys(&entries)?;
                    }
                    Some(_) => {}
                }
            }
        }

        self.refresh()?;
        info!(repaired = report.drift.len(), "catalog reconciled");
        Ok(report)
    }
}
