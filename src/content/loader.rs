// SPDX-License-Identifier: PMPL-1.0-or-later

//! Collection loading: walks `<content>/<collection>/`, parses every data
//! file and validates it against the registry.
//!
//! JSON and YAML files are accepted. Files whose name starts with `.` or `_`
//! are skipped, as are files with other extensions. An entry's id is its
//! path relative to the collection directory, without extension, using `/`
//! separators (`2023/mar-en-calma`).

use super::artwork::Artwork;
use super::error::ContentError;
use super::registry::SchemaRegistry;
use super::schema::{Collection, SchemaRevision};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DataFormat {
    Json,
    Yaml,
}

impl DataFormat {
    fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(DataFormat::Json),
            "yaml" | "yml" => Some(DataFormat::Yaml),
            _ => None,
        }
    }

    fn parse(self, path: &Path, raw: &str) -> Result<Value, ContentError> {
        match self {
            DataFormat::Json => serde_json::from_str(raw).map_err(|source| ContentError::Json {
                path: path.to_path_buf(),
                source,
            }),
            DataFormat::Yaml => serde_yaml::from_str(raw).map_err(|source| ContentError::Yaml {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// A validated record together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentEntry {
    pub id: String,
    pub path: PathBuf,
    pub data: Artwork,
}

/// Outcome of loading one collection directory.
#[derive(Debug)]
pub struct CollectionLoad {
    pub collection: Collection,
    pub revision: SchemaRevision,
    pub directory: PathBuf,
    /// Valid entries, sorted by id.
    pub entries: Vec<ContentEntry>,
    /// Files that failed to read, parse or validate.
    pub failures: Vec<ContentError>,
}

impl CollectionLoad {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Entries, or the first failure when any file was rejected.
    pub fn into_entries(self) -> Result<Vec<ContentEntry>, ContentError> {
        match self.failures.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.entries),
        }
    }
}

fn entry_id(collection_dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(collection_dir).unwrap_or(path);
    let stem = relative.with_extension("");
    stem.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_ignored(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.starts_with('.') || name.starts_with('_'))
        .unwrap_or(true)
}

/// Parse and validate a single content file.
pub fn load_file(
    path: &Path,
    collection: Collection,
    registry: &SchemaRegistry,
) -> Result<Artwork, ContentError> {
    let format = DataFormat::from_path(path).unwrap_or(DataFormat::Json);
    let raw = fs::read_to_string(path).map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = format.parse(path, &raw)?;
    registry
        .validate(collection, &value)
        .map_err(|violation| ContentError::Schema {
            path: path.to_path_buf(),
            violation,
        })
}

/// Load every data file of `collection` under `content_dir`.
///
/// A missing collection directory yields an empty, valid collection. Errors
/// in individual files, including entries the directory walk cannot read,
/// are collected in [`CollectionLoad::failures`]; only a collection path
/// that is not a directory aborts the load.
pub fn load_collection(
    content_dir: &Path,
    collection: Collection,
    registry: &SchemaRegistry,
) -> Result<CollectionLoad, ContentError> {
    let directory = content_dir.join(collection.dir_name());
    let revision = registry.revision(collection);
    let mut load = CollectionLoad {
        collection,
        revision,
        directory: directory.clone(),
        entries: Vec::new(),
        failures: Vec::new(),
    };

    if !directory.exists() {
        tracing::warn!(collection = %collection, dir = %directory.display(), "collection directory not found");
        return Ok(load);
    }
    if !directory.is_dir() {
        return Err(ContentError::NotADirectory(directory));
    }

    let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();
    let walker = WalkDir::new(&directory)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_ignored(e.path()));

    for item in walker {
        let item = match item {
            Ok(item) => item,
            Err(source) => {
                let path = source.path().unwrap_or(directory.as_path()).to_path_buf();
                tracing::warn!(path = %path.display(), err = %source, "unreadable entry in collection");
                load.failures.push(ContentError::Walk { path, source });
                continue;
            }
        };
        if !item.file_type().is_file() {
            continue;
        }
        let path = item.path();
        if DataFormat::from_path(path).is_none() {
            tracing::debug!(path = %path.display(), "skipping non-data file");
            continue;
        }

        let id = entry_id(&directory, path);
        if let Some(existing) = seen.get(&id) {
            load.failures.push(ContentError::DuplicateId {
                id,
                path: path.to_path_buf(),
                existing: existing.clone(),
            });
            continue;
        }
        seen.insert(id.clone(), path.to_path_buf());

        match load_file(path, collection, registry) {
            Ok(data) => load.entries.push(ContentEntry {
                id,
                path: path.to_path_buf(),
                data,
            }),
            Err(err) => load.failures.push(err),
        }
    }

    load.entries.sort_by(|a, b| a.id.cmp(&b.id));
    tracing::debug!(
        collection = %collection,
        revision = %revision,
        entries = load.entries.len(),
        failures = load.failures.len(),
        "collection loaded"
    );
    Ok(load)
}

/// Load every collection known to the registry.
pub fn load_all(content_dir: &Path, registry: &SchemaRegistry) -> Result<Vec<CollectionLoad>, ContentError> {
    Collection::all()
        .iter()
        .map(|&collection| load_collection(content_dir, collection, registry))
        .collect()
}
