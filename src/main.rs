// SPDX-License-Identifier: PMPL-1.0-or-later

//! artfolio: content validation and translation lookup for the portfolio site

use anyhow::{bail, Context, Result};
use artfolio::config::SiteConfig;
use artfolio::i18n::{self, Catalog, Locale};
use artfolio::report::{self, ReportOutputFormat, ValidationReport};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser)]
#[command(name = "artfolio")]
#[command(version)]
#[command(about = "Content schemas and es/en translations for the portfolio site")]
#[command(long_about = None)]
struct Cli {
    /// Config file (default: ./artfolio.yaml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate every record in the originals and prints collections
    Validate {
        /// Content root holding one directory per collection
        #[arg(short, long)]
        content: Option<PathBuf>,

        /// Write the validation report to a file
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Report format (default: from the --output extension, else json)
        #[arg(short, long, value_enum)]
        format: Option<ReportOutputFormat>,
    },

    /// Resolve a dotted translation key
    Translate {
        #[arg(value_enum)]
        locale: LocaleArg,

        /// Dotted key, e.g. nav.home
        key: String,

        /// Directory containing es.json and en.json
        #[arg(short, long)]
        locales: Option<PathBuf>,
    },

    /// Print the locale a URL or path would be rendered in
    DetectLocale {
        /// Absolute URL or bare path
        #[arg(value_name = "URL")]
        target: String,

        /// Deployment base stripped before detection (default: base_path from config)
        #[arg(short, long)]
        base: Option<String>,
    },

    /// List keys missing from one of the locale dictionaries
    Locales {
        /// Directory containing es.json and en.json
        #[arg(short, long)]
        locales: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LocaleArg {
    Es,
    En,
}

impl From<LocaleArg> for Locale {
    fn from(arg: LocaleArg) -> Self {
        match arg {
            LocaleArg::Es => Locale::Es,
            LocaleArg::En => Locale::En,
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "artfolio=debug" } else { "artfolio=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&Path>) -> Result<SiteConfig> {
    match path {
        Some(path) => SiteConfig::load(path),
        None => SiteConfig::load_default(),
    }
}

fn load_catalog(dir: Option<&Path>) -> Result<Catalog> {
    match dir {
        Some(dir) => Catalog::from_dir(dir)
            .with_context(|| format!("loading dictionaries from {}", dir.display())),
        None => Ok(Catalog::embedded().clone()),
    }
}

/// Accepts a full URL or a bare pathname; relative input is treated as a path.
/// The deployment base is removed before the locale marker is looked for.
fn locale_for_target(target: &str, base_path: &str) -> Locale {
    let parsed = Url::parse(target);
    let path = match &parsed {
        Ok(url) => url.path(),
        Err(_) => target.split(['?', '#']).next().unwrap_or_default(),
    };
    i18n::detect_locale_from_path(i18n::strip_base_path(path, base_path))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Validate {
            content,
            output,
            format,
        } => {
            let content_dir = content.unwrap_or_else(|| config.content_dir.clone());
            let registry = config.registry();
            let loads = artfolio::content::load_all(&content_dir, &registry)
                .with_context(|| format!("loading collections from {}", content_dir.display()))?;

            let report = ValidationReport::from_loads(&content_dir, &loads);
            report::print_summary(&report);

            if let Some((output_path, format)) = report::resolve_output(output, format) {
                report::write_report(&report, &output_path, format)?;
                println!("Report saved to: {}", output_path.display());
            }

            if !report.is_clean() {
                bail!("{} content file(s) failed validation", report.total_failures);
            }
        }

        Commands::Translate {
            locale,
            key,
            locales,
        } => {
            let catalog = load_catalog(locales.as_deref().or(config.locales_dir.as_deref()))?;
            println!("{}", catalog.translate(locale.into(), &key));
        }

        Commands::DetectLocale { target, base } => {
            let base_path = base.unwrap_or_else(|| config.base_path.clone());
            let locale = locale_for_target(&target, &base_path);
            println!("{} ({})", locale.code(), locale.native_name());
        }

        Commands::Locales { locales } => {
            let catalog = load_catalog(locales.as_deref().or(config.locales_dir.as_deref()))?;
            let gaps = catalog.coverage();
            if gaps.is_empty() {
                let keys = catalog.dictionary(Locale::default()).leaf_keys().len();
                println!("{} {} keys present in every locale", "✓".green(), keys);
                return Ok(());
            }

            println!("{}", "MISSING TRANSLATIONS".bold().yellow());
            for gap in &gaps {
                println!(
                    "  {:<40} defined in {}, missing in {}",
                    gap.key,
                    gap.defined_in,
                    gap.missing_in.to_string().red()
                );
            }
            bail!("{} translation key(s) missing", gaps.len());
        }
    }

    Ok(())
}
