// SPDX-License-Identifier: PMPL-1.0-or-later

//! Validation reports for content collections.

use crate::content::{CollectionLoad, Collection, FieldIssue, SchemaRevision};
use anyhow::Result;
use clap::ValueEnum;
use colored::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

const DEFAULT_REPORT_STEM: &str = "validation-report";

/// File format of a written validation report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportOutputFormat {
    Json,
    Yaml,
}

impl ReportOutputFormat {
    /// Format named by a file extension such as `json` or `yml`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "json" => Some(ReportOutputFormat::Json),
            "yaml" | "yml" => Some(ReportOutputFormat::Yaml),
            _ => None,
        }
    }

    /// Extension used when the report path is derived from the format.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportOutputFormat::Json => "json",
            ReportOutputFormat::Yaml => "yaml",
        }
    }

    /// Format implied by a report path's extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension().and_then(|ext| ext.to_str()).and_then(Self::parse)
    }

    pub fn serialize(&self, report: &ValidationReport) -> Result<String> {
        match self {
            ReportOutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            ReportOutputFormat::Yaml => Ok(serde_yaml::to_string(report)?),
        }
    }
}

/// A file rejected during loading.
#[derive(Debug, Clone, Serialize)]
pub struct FileFailure {
    pub file: PathBuf,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<FieldIssue>,
}

/// Outcome for one collection.
#[derive(Debug, Clone, Serialize)]
pub struct CollectionReport {
    pub collection: Collection,
    pub revision: SchemaRevision,
    pub directory: PathBuf,
    pub valid: usize,
    pub ids: Vec<String>,
    pub failures: Vec<FileFailure>,
}

/// Complete validation report.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub created_at: String,
    pub content_dir: PathBuf,
    pub total_valid: usize,
    pub total_failures: usize,
    pub collections: Vec<CollectionReport>,
}

impl ValidationReport {
    pub fn from_loads(content_dir: &Path, loads: &[CollectionLoad]) -> Self {
        let collections: Vec<CollectionReport> = loads
            .iter()
            .map(|load| CollectionReport {
                collection: load.collection,
                revision: load.revision,
                directory: load.directory.clone(),
                valid: load.entries.len(),
                ids: load.entries.iter().map(|e| e.id.clone()).collect(),
                failures: load
                    .failures
                    .iter()
                    .map(|err| FileFailure {
                        file: err.path().to_path_buf(),
                        message: err.to_string(),
                        issues: err.issues().to_vec(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            created_at: chrono::Utc::now().to_rfc3339(),
            content_dir: content_dir.to_path_buf(),
            total_valid: collections.iter().map(|c| c.valid).sum(),
            total_failures: collections.iter().map(|c| c.failures.len()).sum(),
            collections,
        }
    }

    pub fn is_clean(&self) -> bool {
        self.total_failures == 0
    }
}

/// Print a summary to the terminal.
pub fn print_summary(report: &ValidationReport) {
    println!("\n{}", "=== CONTENT VALIDATION ===".bold().cyan());
    println!("Content: {}", report.content_dir.display());
    println!();

    for collection in &report.collections {
        let status = if collection.failures.is_empty() {
            "OK".green().bold()
        } else {
            "FAIL".red().bold()
        };
        println!(
            "  [{}] {:<10} ({} schema)  valid: {}  failed: {}",
            status,
            collection.collection.to_string(),
            collection.revision,
            collection.valid,
            collection.failures.len()
        );
        for failure in &collection.failures {
            println!("      {}", failure.file.display().to_string().yellow());
            if failure.issues.is_empty() {
                println!("        {}", failure.message);
            }
            for issue in &failure.issues {
                println!("        - {}", issue);
            }
        }
    }

    println!();
    if report.is_clean() {
        println!("{} {} records valid", "✓".green(), report.total_valid);
    } else {
        println!(
            "{} {} of {} files failed validation",
            "✗".red(),
            report.total_failures,
            report.total_valid + report.total_failures
        );
    }
}

/// Settle where a report goes and in which format.
///
/// An explicit format wins; otherwise the output's extension decides, falling
/// back to JSON. A format without a path writes `validation-report.<ext>` in
/// the working directory. With neither, no report is written.
pub fn resolve_output(
    output: Option<PathBuf>,
    format: Option<ReportOutputFormat>,
) -> Option<(PathBuf, ReportOutputFormat)> {
    match (output, format) {
        (Some(path), Some(format)) => Some((path, format)),
        (Some(path), None) => {
            let format = ReportOutputFormat::from_path(&path).unwrap_or(ReportOutputFormat::Json);
            Some((path, format))
        }
        (None, Some(format)) => {
            let path = PathBuf::from(format!("{}.{}", DEFAULT_REPORT_STEM, format.extension()));
            Some((path, format))
        }
        (None, None) => None,
    }
}

/// Write report in the requested format.
pub fn write_report(report: &ValidationReport, path: &Path, format: ReportOutputFormat) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, format.serialize(report)?)?;
    Ok(())
}
