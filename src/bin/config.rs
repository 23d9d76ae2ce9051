//! Locale Config CLI
//!
//! Inspect the resolved catalog settings, write a starter `locale.toml`, and
//! check that the configured catalog actually opens.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use locale_catalog::{CatalogConfig, LocalizationManager, OutputFormat};

#[derive(Parser)]
#[command(name = "locale-config")]
#[command(about = "Resolve and check localization catalog settings")]
struct Cli {
    /// Config file layered over the defaults (optional)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the resolved settings
    Show {
        /// Print as TOML instead of a summary
        #[arg(long)]
        toml: bool,
    },

    /// Write a locale.toml pointing at a catalog root
    Init {
        /// Catalog root to record
        #[arg(long, default_value = "lang")]
        root: PathBuf,

        /// Container extension to record
        #[arg(long, default_value = "json")]
        extension: String,

        /// Write single-line containers
        #[arg(long)]
        compact: bool,

        /// Destination file
        #[arg(short, long, default_value = "locale.toml")]
        output: String,
    },

    /// Open the configured catalog and report its inventory
    Check,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let loaded = CatalogConfig::load_from(cli.config.as_deref());

    match cli.command {
        Commands::Show { toml } => {
            let cfg = loaded?;
            if toml {
                print!("{}", ::toml::to_string_pretty(&cfg)?);
                return Ok(());
            }
            println!("root       {}", cfg.catalog_root().display());
            println!("extension  .{}", cfg.catalog.extension);
            println!("format     {:?}", cfg.catalog.output_format);
            println!("log filter {}", cfg.logging.filter);
        }

        Commands::Init {
            root,
            extension,
            compact,
            output,
        } => {
            if std::path::Path::new(&output).exists() {
                anyhow::bail!("{} already exists", output);
            }
            let mut cfg = CatalogConfig::default();
            cfg.catalog.root = root;
            cfg.catalog.extension = extension.trim_start_matches('.').to_string();
            if compact {
                cfg.catalog.output_format = OutputFormat::Compact;
            }
            cfg.save(&output)
                .with_context(|| format!("writing {}", output))?;
            println!("✅ Wrote {} (catalog at {})", output, cfg.catalog.root.display());
        }

        Commands::Check => {
            let cfg = loaded?;
            if cfg.catalog.extension.trim_start_matches('.').is_empty() {
                anyhow::bail!("catalog extension must not be empty");
            }
            let root = cfg.catalog_root();
            let manager = LocalizationManager::with_options(&root, cfg.options())
                .with_context(|| format!("opening catalog at {}", root.display()))?;
            let report = manager.audit()?;

            println!(
                "📂 {}: {} languages, {} sections",
                root.display(),
                manager.languages().len(),
                manager.sections().len()
            );
            if report.is_consistent() {
                println!("✅ Catalog opens and every language is in sync");
            } else {
                println!(
                    "⚠️  {} gaps between languages - run `locale-catalog audit` for details",
                    report.drift.len()
                );
            }
        }
    }

    Ok(())
}
