// SPDX-License-Identifier: PMPL-1.0-or-later

//! Nested locale dictionaries and dotted-key descent.
//!
//! A dictionary is a JSON document whose root is an object. Keys such as
//! `"nav.home"` address nested objects one segment at a time. Leaves keep
//! their JSON scalar kind so that "falsy" values (`""`, `0`, `false`,
//! `null`) can be rejected explicitly instead of rendering as blank text.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("reading dictionary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parsing dictionary {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("dictionary {origin} must be a JSON object at its root")]
    NotAMapping { origin: String },
}

/// One value in a locale dictionary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Entry {
    Null,
    Flag(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<Entry>),
    Node(BTreeMap<String, Entry>),
}

impl Entry {
    /// Step into a child. Lists are addressed by decimal index segments.
    pub fn child(&self, segment: &str) -> Option<&Entry> {
        match self {
            Entry::Node(children) => children.get(segment),
            Entry::List(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    pub fn is_falsy(&self) -> bool {
        match self {
            Entry::Null => true,
            Entry::Flag(flag) => !flag,
            Entry::Number(n) => n.as_f64().map(|v| v == 0.0).unwrap_or(false),
            Entry::Text(text) => text.is_empty(),
            Entry::List(_) | Entry::Node(_) => false,
        }
    }

    /// Display text for a leaf. Containers and falsy leaves have none.
    pub fn render(&self) -> Option<Cow<'_, str>> {
        if self.is_falsy() {
            return None;
        }
        match self {
            Entry::Text(text) => Some(Cow::Borrowed(text.as_str())),
            Entry::Number(n) => Some(Cow::Owned(n.to_string())),
            Entry::Flag(flag) => Some(Cow::Owned(flag.to_string())),
            Entry::Null | Entry::List(_) | Entry::Node(_) => None,
        }
    }

    fn collect_leaf_keys(&self, prefix: &str, out: &mut BTreeSet<String>) {
        let join = |segment: &str| {
            if prefix.is_empty() {
                segment.to_string()
            } else {
                format!("{}.{}", prefix, segment)
            }
        };
        match self {
            Entry::Node(children) => {
                for (segment, child) in children {
                    child.collect_leaf_keys(&join(segment), out);
                }
            }
            Entry::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    item.collect_leaf_keys(&join(&index.to_string()), out);
                }
            }
            _ => {
                out.insert(prefix.to_string());
            }
        }
    }
}

/// A parsed locale dictionary. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    root: Entry,
}

impl Dictionary {
    pub fn empty() -> Self {
        Self {
            root: Entry::Node(BTreeMap::new()),
        }
    }

    /// Parse a dictionary from JSON text. `origin` names the source in errors.
    pub fn from_json_str(raw: &str, origin: &str) -> Result<Self, DictionaryError> {
        let root: Entry = serde_json::from_str(raw).map_err(|source| DictionaryError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        Self::from_entry(root, origin)
    }

    pub fn from_file(path: &Path) -> Result<Self, DictionaryError> {
        let raw = fs::read_to_string(path).map_err(|source| DictionaryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dictionary = Self::from_json_str(&raw, &path.display().to_string())?;
        tracing::debug!(path = %path.display(), keys = dictionary.leaf_keys().len(), "loaded dictionary");
        Ok(dictionary)
    }

    pub fn from_entry(root: Entry, origin: &str) -> Result<Self, DictionaryError> {
        match root {
            Entry::Node(_) => Ok(Self { root }),
            _ => Err(DictionaryError::NotAMapping {
                origin: origin.to_string(),
            }),
        }
    }

    /// Descend along a dotted key path.
    ///
    /// Returns `None` as soon as a segment is missing or the current value
    /// cannot hold children.
    pub fn lookup(&self, key: &str) -> Option<&Entry> {
        let mut current = &self.root;
        for segment in key.split('.') {
            current = current.child(segment)?;
        }
        Some(current)
    }

    /// Text for `key`, or `None` when the path is missing, ends on a
    /// container, or ends on a falsy leaf.
    pub fn resolve(&self, key: &str) -> Option<Cow<'_, str>> {
        self.lookup(key).and_then(Entry::render)
    }

    /// Dotted paths of every leaf, sorted.
    pub fn leaf_keys(&self) -> BTreeSet<String> {
        let mut keys = BTreeSet::new();
        if let Entry::Node(children) = &self.root {
            for (segment, child) in children {
                child.collect_leaf_keys(segment, &mut keys);
            }
        }
        keys
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::empty()
    }
}
