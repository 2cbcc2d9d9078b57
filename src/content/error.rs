// SPDX-License-Identifier: PMPL-1.0-or-later

use super::schema::{Collection, FieldIssue, SchemaRevision};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// A record that does not match its collection's schema revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub collection: Collection,
    pub revision: SchemaRevision,
    pub issues: Vec<FieldIssue>,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} record does not match the {} schema: ",
            self.collection, self.revision
        )?;
        let details: Vec<String> = self.issues.iter().map(ToString::to_string).collect();
        f.write_str(&details.join("; "))
    }
}

impl std::error::Error for SchemaViolation {}

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("walking {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("{path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path} is not valid YAML: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("{path}: {violation}")]
    Schema {
        path: PathBuf,
        violation: SchemaViolation,
    },
    #[error("{path} collides with {existing}: both define entry `{id}`")]
    DuplicateId {
        id: String,
        path: PathBuf,
        existing: PathBuf,
    },
    #[error("collection path {0} exists but is not a directory")]
    NotADirectory(PathBuf),
}

impl ContentError {
    /// File the error is attributed to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            ContentError::Io { path, .. }
            | ContentError::Walk { path, .. }
            | ContentError::Json { path, .. }
            | ContentError::Yaml { path, .. }
            | ContentError::Schema { path, .. }
            | ContentError::DuplicateId { path, .. }
            | ContentError::NotADirectory(path) => path,
        }
    }

    /// Field-level issues, when the error is a schema violation.
    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            ContentError::Schema { violation, .. } => &violation.issues,
            _ => &[],
        }
    }
}
