// SPDX-License-Identifier: PMPL-1.0-or-later

//! Site configuration (`artfolio.yaml`)
//!
//! ```yaml
//! base_path: /web-portfolio   # where the site is deployed; stripped before locale detection
//! content_dir: src/content
//! locales_dir: src/i18n      # omit to use the dictionaries built into the binary
//! collections:
//!   originals: bilingual
//!   prints: legacy
//! ```

use crate::content::{Collection, SchemaRegistry, SchemaRevision};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "artfolio.yaml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// URL prefix the site is served under, `/` at the domain root.
    pub base_path: String,
    pub content_dir: PathBuf,
    pub locales_dir: Option<PathBuf>,
    pub collections: CollectionRevisions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CollectionRevisions {
    pub originals: SchemaRevision,
    pub prints: SchemaRevision,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_path: "/".to_string(),
            content_dir: PathBuf::from("src/content"),
            locales_dir: None,
            collections: CollectionRevisions::default(),
        }
    }
}

impl SiteConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: SiteConfig = serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Load `artfolio.yaml` from the working directory, or defaults when it
    /// does not exist.
    pub fn load_default() -> Result<Self> {
        let path = Path::new(DEFAULT_CONFIG_FILE);
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn registry(&self) -> SchemaRegistry {
        SchemaRegistry::new()
            .with_revision(Collection::Originals, self.collections.originals)
            .with_revision(Collection::Prints, self.collections.prints)
    }
}
