// SPDX-License-Identifier: PMPL-1.0-or-later

//! Typed artwork records, one struct per schema revision.

use super::schema::SchemaRevision;
use crate::i18n::Locale;
use serde::{Deserialize, Serialize};

fn default_available() -> bool {
    true
}

/// Text published in both site locales.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub es: String,
    pub en: String,
}

impl LocalizedText {
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Es => &self.es,
            Locale::En => &self.en,
        }
    }
}

/// Single-language artwork record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyArtwork {
    pub title: String,
    pub description: String,
    pub price: String,
    /// Any JSON number; `2022.5` and `2023.0` are both accepted.
    pub year: f64,
    pub dimensions: String,
    pub medium: String,
    pub image: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

/// Bilingual artwork record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BilingualArtwork {
    pub title: LocalizedText,
    pub description: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub year: f64,
    pub dimensions: String,
    pub image: String,
    #[serde(default = "default_available")]
    pub available: bool,
}

impl BilingualArtwork {
    pub fn title_for(&self, locale: Locale) -> &str {
        self.title.get(locale)
    }

    pub fn description_for(&self, locale: Locale) -> &str {
        self.description.get(locale)
    }
}

/// A validated record of either revision.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Artwork {
    Legacy(LegacyArtwork),
    Bilingual(BilingualArtwork),
}

impl Artwork {
    pub fn revision(&self) -> SchemaRevision {
        match self {
            Artwork::Legacy(_) => SchemaRevision::Legacy,
            Artwork::Bilingual(_) => SchemaRevision::Bilingual,
        }
    }

    /// Title to show for `locale`. Legacy records have a single title.
    pub fn title_for(&self, locale: Locale) -> &str {
        match self {
            Artwork::Legacy(a) => &a.title,
            Artwork::Bilingual(a) => a.title_for(locale),
        }
    }

    pub fn description_for(&self, locale: Locale) -> &str {
        match self {
            Artwork::Legacy(a) => &a.description,
            Artwork::Bilingual(a) => a.description_for(locale),
        }
    }

    pub fn price(&self) -> Option<&str> {
        match self {
            Artwork::Legacy(a) => Some(&a.price),
            Artwork::Bilingual(a) => a.price.as_deref(),
        }
    }

    pub fn year(&self) -> f64 {
        match self {
            Artwork::Legacy(a) => a.year,
            Artwork::Bilingual(a) => a.year,
        }
    }

    pub fn dimensions(&self) -> &str {
        match self {
            Artwork::Legacy(a) => &a.dimensions,
            Artwork::Bilingual(a) => &a.dimensions,
        }
    }

    pub fn image(&self) -> &str {
        match self {
            Artwork::Legacy(a) => &a.image,
            Artwork::Bilingual(a) => &a.image,
        }
    }

    pub fn available(&self) -> bool {
        match self {
            Artwork::Legacy(a) => a.available,
            Artwork::Bilingual(a) => a.available,
        }
    }
}
