//! Locale Catalog
//!
//! A filesystem-backed, multi-language localization catalog. Languages,
//! sections and keys are created, renamed and deleted across every language
//! at once so that all languages share the same schema.
//!
//! ## Features
//!
//! - **Schema Uniformity**: every language holds the same sections and keys
//! - **Two-Phase Fan-Out**: preconditions are checked for every language before any write
//! - **Partial-Failure Reporting**: a mutation that stops midway names the languages it touched
//! - **Reconciliation**: audit drift on disk and fill gaps with empty values
//! - **Plain Data Containers**: order-preserving JSON objects, never executable code
//!
//! ## Architecture
//!
//! ```text
//! lang/
//! ├── en/
//! │   ├── messages.json
//! │   └── errors.json
//! ├── uk/
//! │   ├── messages.json
//! │   └── errors.json
//! └── pl/
//!     ├── messages.json
//!     └── errors.json
//! ```

pub mod audit;
pub mod config;
pub mod container;
pub mod error;
pub mod fanout;
pub mod introspect;
pub mod key;
pub mod language;
pub mod manager;
pub mod paths;
pub mod schema;
pub mod section;

pub use audit::{AuditReport, Drift};
pub use config::CatalogConfig;
pub use container::{Entries, OutputFormat};
pub use error::{ErrorKind, LocaleError, Result};
pub use fanout::FanOut;
pub use key::KeyStore;
pub use language::LanguageStore;
pub use manager::{CatalogOptions, LocalizationManager};
pub use paths::CatalogLayout;
pub use schema::CatalogSchema;
pub use section::SectionStore;
