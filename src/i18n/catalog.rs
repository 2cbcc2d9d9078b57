// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation catalog for the portfolio UI.
//!
//! Holds one [`Dictionary`] per [`Locale`]. The Spanish and English
//! dictionaries under `locales/` are embedded at compile time and parsed on
//! first use; after that every lookup is a read-only walk over shared data,
//! safe to call from any thread.
//!
//! ## Adding a new key
//!
//! 1. Add it to `locales/es.json` and `locales/en.json` under the same path
//! 2. Run `artfolio locales` to confirm both dictionaries still line up

use super::dictionary::{Dictionary, DictionaryError};
use super::locale::Locale;
use serde::Serialize;
use std::path::Path;
use std::sync::OnceLock;

const EMBEDDED_ES: &str = include_str!("../../locales/es.json");
const EMBEDDED_EN: &str = include_str!("../../locales/en.json");

static EMBEDDED: OnceLock<Catalog> = OnceLock::new();

/// Dictionaries for every supported locale.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    es: Dictionary,
    en: Dictionary,
}

/// A leaf key defined for one locale but missing from another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageGap {
    pub key: String,
    pub defined_in: Locale,
    pub missing_in: Locale,
}

impl Catalog {
    pub fn new(es: Dictionary, en: Dictionary) -> Self {
        Self { es, en }
    }

    /// The catalog compiled into the binary, parsed once per process.
    ///
    /// A broken embedded dictionary is logged and replaced by an empty one,
    /// so lookups degrade to echoing their keys instead of failing.
    pub fn embedded() -> &'static Catalog {
        EMBEDDED.get_or_init(|| {
            let load = |raw: &str, origin: &str| {
                Dictionary::from_json_str(raw, origin).unwrap_or_else(|err| {
                    tracing::error!(%err, "embedded dictionary unusable, falling back to keys");
                    Dictionary::empty()
                })
            };
            Catalog::new(
                load(EMBEDDED_ES, "locales/es.json"),
                load(EMBEDDED_EN, "locales/en.json"),
            )
        })
    }

    /// Load `es.json` and `en.json` from a directory.
    pub fn from_dir(dir: &Path) -> Result<Self, DictionaryError> {
        let load = |locale: Locale| Dictionary::from_file(&dir.join(format!("{}.json", locale.code())));
        Ok(Self::new(load(Locale::Es)?, load(Locale::En)?))
    }

    pub fn dictionary(&self, locale: Locale) -> &Dictionary {
        match locale {
            Locale::Es => &self.es,
            Locale::En => &self.en,
        }
    }

    /// Resolve `key` in `locale`, echoing the key when it does not resolve to
    /// usable text.
    pub fn translate(&self, locale: Locale, key: &str) -> String {
        self.translator(locale).t(key)
    }

    /// A lookup function bound to one locale.
    pub fn translator(&self, locale: Locale) -> Translator<'_> {
        Translator {
            locale,
            dictionary: self.dictionary(locale),
        }
    }

    /// Keys present in one locale and absent from another, sorted by key.
    pub fn coverage(&self) -> Vec<CoverageGap> {
        let mut gaps = Vec::new();
        for &defined_in in Locale::all() {
            let defined = self.dictionary(defined_in).leaf_keys();
            for &missing_in in Locale::all() {
                if missing_in == defined_in {
                    continue;
                }
                let other = self.dictionary(missing_in).leaf_keys();
                gaps.extend(defined.difference(&other).map(|key| CoverageGap {
                    key: key.clone(),
                    defined_in,
                    missing_in,
                }));
            }
        }
        gaps.sort_by(|a, b| a.key.cmp(&b.key).then(a.defined_in.cmp(&b.defined_in)));
        gaps
    }
}

/// Translation function for a single locale, as handed to page code.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    locale: Locale,
    dictionary: &'a Dictionary,
}

impl<'a> Translator<'a> {
    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn t(&self, key: &str) -> String {
        match self.dictionary.resolve(key) {
            Some(text) => text.into_owned(),
            None => {
                tracing::trace!(locale = %self.locale, key, "translation missing, echoing key");
                key.to_string()
            }
        }
    }
}

/// Look up a dotted key in the embedded catalog.
///
/// Falls back to the key itself when it is missing, points at a nested
/// group, or holds an empty/falsy value. Never panics, never returns an
/// empty string for a non-empty key.
///
/// # Examples
///
/// ```
/// use artfolio::i18n::{translate, Locale};
/// assert_eq!(translate(Locale::Es, "nav.home"), "Inicio");
/// assert_eq!(translate(Locale::En, "nav.home"), "Home");
/// assert_eq!(translate(Locale::En, "nav.nowhere"), "nav.nowhere");
/// ```
pub fn translate(locale: Locale, key: &str) -> String {
    Catalog::embedded().translate(locale, key)
}

/// Curried form of [`translate`]: bind a locale once, then resolve keys.
pub fn use_translations(locale: Locale) -> impl Fn(&str) -> String + Send + Sync + 'static {
    let translator = Catalog::embedded().translator(locale);
    move |key: &str| translator.t(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(es: &str, en: &str) -> Catalog {
        Catalog::new(
            Dictionary::from_json_str(es, "es").unwrap(),
            Dictionary::from_json_str(en, "en").unwrap(),
        )
    }

    #[test]
    fn test_translate_nested_key() {
        let c = catalog(r#"{ "nav": { "home": "Inicio" } }"#, r#"{ "nav": { "home": "Home" } }"#);
        assert_eq!(c.translate(Locale::Es, "nav.home"), "Inicio");
        assert_eq!(c.translate(Locale::En, "nav.home"), "Home");
    }

    #[test]
    fn test_missing_key_echoes() {
        let c = catalog(r#"{ "nav": { "home": "Inicio" } }"#, "{}");
        assert_eq!(c.translate(Locale::Es, "nav.missing"), "nav.missing");
        assert_eq!(c.translate(Locale::En, "nav.home"), "nav.home");
        assert_eq!(c.translate(Locale::Es, "nav"), "nav");
    }

    #[test]
    fn test_no_cross_locale_fallback() {
        let c = catalog(r#"{ "only": "solo" }"#, r#"{ "other": "x" }"#);
        assert_eq!(c.translate(Locale::En, "only"), "only");
    }

    #[test]
    fn test_translator_matches_translate() {
        let c = catalog(r#"{ "a": { "b": "ab" } }"#, "{}");
        let t = c.translator(Locale::Es);
        assert_eq!(t.locale(), Locale::Es);
        for key in ["a.b", "a", "a.b.c", "zzz"] {
            assert_eq!(t.t(key), c.translate(Locale::Es, key));
        }
    }

    #[test]
    fn test_coverage_reports_both_directions() {
        let c = catalog(
            r#"{ "nav": { "home": "Inicio", "shop": "Tienda" } }"#,
            r#"{ "nav": { "home": "Home" }, "extra": "x" }"#,
        );
        let gaps = c.coverage();
        assert_eq!(
            gaps,
            vec![
                CoverageGap {
                    key: "extra".into(),
                    defined_in: Locale::En,
                    missing_in: Locale::Es,
                },
                CoverageGap {
                    key: "nav.shop".into(),
                    defined_in: Locale::Es,
                    missing_in: Locale::En,
                },
            ]
        );
    }

    #[test]
    fn test_embedded_catalog_is_complete() {
        let c = Catalog::embedded();
        assert!(c.coverage().is_empty(), "gaps: {:?}", c.coverage());
        assert!(!c.dictionary(Locale::Es).leaf_keys().is_empty());
    }

    #[test]
    fn test_use_translations() {
        let t = use_translations(Locale::En);
        assert_eq!(t("artwork.sold"), "Sold");
        assert_eq!(t("artwork.unknown"), "artwork.unknown");
    }
}
