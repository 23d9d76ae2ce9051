//! Container codec
//!
//! A container is one section's key → value mapping for one language,
//! persisted as a JSON object. Key order is preserved on round-trip.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Output format for containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Compact,
}

/// Insertion-ordered key → value entries of one container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entries(Map<String, Value>);

impl Entries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Value of `key`, coerced to text
    pub fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).map(value_to_text)
    }

    /// Insert or overwrite `key`; new keys are appended
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), Value::String(value.into()));
    }

    /// Remove `key`, keeping the order of the remaining entries
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.shift_remove(key).map(|v| value_to_text(&v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, String)> {
        self.0.iter().map(|(k, v)| (k.as_str(), value_to_text(v)))
    }

    /// Same keys, every value blanked
    pub fn blanked(&self) -> Self {
        self.keys().map(|k| (k.to_string(), String::new())).collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Entries {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut entries = Entries::new();
        for (k, v) in iter {
            entries.insert(k, v);
        }
        entries
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Serialize entries to container text
pub fn encode(entries: &Entries, format: OutputFormat) -> Result<String> {
    let mut content = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(entries)?,
        OutputFormat::Compact => serde_json::to_string(entries)?,
    };
    content.push('\n');
    Ok(content)
}

/// Parse container text into entries
pub fn decode(content: &str) -> Result<Entries> {
    if content.trim().is_empty() {
        return Ok(Entries::new());
    }
    Ok(serde_json::from_str(content)?)
}
