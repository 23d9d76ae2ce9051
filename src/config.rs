//! Configuration management for the localization catalog
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (locale.toml)
//! - Environment variables (LOCALE__*)
//!
//! ## Example config file (locale.toml):
//! ```toml
//! [catalog]
//! root = "./resources/lang"
//! extension = "json"
//! output_format = "pretty"
//!
//! [logging]
//! filter = "locale_catalog=info"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::container::OutputFormat;
use crate::manager::CatalogOptions;
use crate::paths::DEFAULT_EXTENSION;

/// Main configuration for the catalog tools
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog location and container format
    #[serde(default)]
    pub catalog: CatalogSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Path to the catalog root (one subdirectory per language)
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Container file extension
    #[serde(default = "default_extension")]
    pub extension: String,

    /// How containers are written
    #[serde(default)]
    pub output_format: OutputFormat,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when RUST_LOG is not set
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_root() -> PathBuf {
    PathBuf::from("lang")
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_filter() -> String {
    "warn".to_string()
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            root: default_root(),
            extension: default_extension(),
            output_format: OutputFormat::Pretty,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

impl CatalogConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering an explicit file over the default locations
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["locale.toml", ".locale.toml", "config/locale.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "locale", "catalog") {
            let xdg_config = config_dir.config_dir().join("locale.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // LOCALE__CATALOG__ROOT=... etc.
        builder = builder.add_source(
            Environment::with_prefix("LOCALE")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Get the catalog root (resolves relative paths)
    pub fn catalog_root(&self) -> PathBuf {
        if self.catalog.root.is_absolute() {
            self.catalog.root.clone()
        } else {
            std::env::current_dir()
                .unwrap_or_default()
                .join(&self.catalog.root)
        }
    }

    /// Options for opening the configured catalog
    pub fn options(&self) -> CatalogOptions {
        CatalogOptions {
            extension: self.catalog.extension.clone(),
            output_format: self.catalog.output_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CatalogConfig::default();
        assert_eq!(config.catalog.extension, "json");
        assert_eq!(config.catalog.output_format, OutputFormat::Pretty);
        assert_eq!(config.options(), CatalogOptions::default());
    }

    #[test]
    fn test_serialize_config() {
        let config = CatalogConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[catalog]"));
        assert!(toml_str.contains("[logging]"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[catalog]\nroot = \"/srv/lang\"\nextension = \"strings\"\noutput_format = \"compact\"\n",
        )
        .unwrap();

        let config = CatalogConfig::load_from(path.to_str()).unwrap();
        assert_eq!(config.catalog_root(), PathBuf::from("/srv/lang"));
        assert_eq!(config.catalog.extension, "strings");
        assert_eq!(config.catalog.output_format, OutputFormat::Compact);
        assert_eq!(config.logging.filter, "warn");
    }
}
