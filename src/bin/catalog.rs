//! Locale Catalog CLI
//!
//! Inspect and edit a localization catalog while keeping every language in sync.
//!
//! Usage:
//!   locale-catalog --root ./lang languages
//!   locale-catalog --root ./lang key create hello messages
//!   locale-catalog --root ./lang key set hello "Welcome" messages en
//!   locale-catalog audit --fix

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use locale_catalog::{AuditReport, CatalogConfig, FanOut, LocalizationManager};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "locale-catalog")]
#[command(about = "Manage a multi-language localization catalog")]
struct Cli {
    /// Path to the catalog root (overrides configuration)
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Config file to load (optional)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List languages
    Languages,

    /// List sections
    Sections,

    /// Show every section's entries for a language
    Keys {
        lang: String,
    },

    /// Show a key's value in every language
    Get {
        key: String,
        section: String,
    },

    /// Language operations
    Lang {
        #[command(subcommand)]
        action: LangAction,
    },

    /// Section operations
    Section {
        #[command(subcommand)]
        action: SectionAction,
    },

    /// Key operations
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Check that every language has the same sections and keys
    Audit {
        /// Create missing sections and keys with empty values
        #[arg(long)]
        fix: bool,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

#[derive(Subcommand)]
enum LangAction {
    /// Create a language, copying the existing sections and keys with empty values
    Create { lang: String },
    /// Rename a language
    Rename { new_lang: String, old_lang: String },
    /// Delete a language and all of its sections
    Delete { lang: String },
}

#[derive(Subcommand)]
enum SectionAction {
    /// Create a section in every language
    Create { section: String },
    /// Rename a section in every language
    Rename { new_section: String, old_section: String },
    /// Delete a section from every language
    Delete { section: String },
}

#[derive(Subcommand)]
enum KeyAction {
    /// Create a key in every language
    Create { key: String, section: String },
    /// Rename a key in every language
    Rename {
        new_key: String,
        old_key: String,
        section: String,
    },
    /// Delete a key from every language
    Delete { key: String, section: String },
    /// Set a key's value for one language
    Set {
        key: String,
        value: String,
        section: String,
        lang: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let config = match CatalogConfig::load_from(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(cli, config) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: Cli, config: CatalogConfig) -> Result<i32> {
    let root = cli.root.clone().unwrap_or_else(|| config.catalog_root());
    let mut manager = LocalizationManager::with_options(&root, config.options())
        .with_context(|| format!("opening catalog at {}", root.display()))?;

    match cli.command {
        Commands::Languages => print_json(&manager.languages())?,
        Commands::Sections => print_json(&manager.sections())?,
        Commands::Keys { lang } => print_json(&manager.keys(&lang)?)?,
        Commands::Get { key, section } => print_json(&manager.key(&key, &section)?)?,

        Commands::Lang { action } => {
            let outcome = match action {
                LangAction::Create { lang } => manager.create_language(&lang)?,
                LangAction::Rename { new_lang, old_lang } => {
                    manager.rename_language(&new_lang, &old_lang)?
                }
                LangAction::Delete { lang } => manager.delete_language(&lang)?,
            };
            print_outcome(&outcome);
        }

        Commands::Section { action } => {
            let outcome = match action {
                SectionAction::Create { section } => manager.create_section(&section)?,
                SectionAction::Rename {
                    new_section,
                    old_section,
                } => manager.rename_section(&new_section, &old_section)?,
                SectionAction::Delete { section } => manager.delete_section(&section)?,
            };
            print_outcome(&outcome);
        }

        Commands::Key { action } => {
            let outcome = match action {
                KeyAction::Create { key, section } => manager.create_key(&key, &section)?,
                KeyAction::Rename {
                    new_key,
                    old_key,
                    section,
                } => manager.rename_key(&new_key, &old_key, &section)?,
                KeyAction::Delete { key, section } => manager.delete_key(&key, &section)?,
                KeyAction::Set {
                    key,
                    value,
                    section,
                    lang,
                } => manager.set_value(&key, &value, &section, &lang)?,
            };
            print_outcome(&outcome);
        }

        Commands::Audit { fix, format } => {
            let report = if fix {
                manager.reconcile()?
            } else {
                manager.audit()?
            };
            match format.as_str() {
                "json" => print_json(&report)?,
                _ => print_report(&report, fix),
            }
            if !fix && !report.is_consistent() {
                return Ok(2);
            }
        }
    }

    Ok(0)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_outcome(outcome: &FanOut) {
    println!("✅ {} applied to: {}", outcome.operation, outcome.targets.join(", "));
}

fn print_report(report: &AuditReport, fixed: bool) {
    println!(
        "🔍 {} languages, {} sections",
        report.languages.len(),
        report.sections.len()
    );
    if report.is_consistent() {
        println!("✅ All languages share the same sections and keys");
        return;
    }
    for drift in &report.drift {
        println!("  {} {}", if fixed { "🔧" } else { "❌" }, drift);
    }
    if fixed {
        println!("\n✅ Repaired {} gaps", report.drift.len());
    } else {
        println!("\n⚠️  {} gaps found - run with --fix to fill them", report.drift.len());
    }
}
