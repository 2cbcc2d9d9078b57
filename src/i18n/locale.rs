// SPDX-License-Identifier: PMPL-1.0-or-later

//! Supported site locales and URL-based locale detection.

use serde::{Deserialize, Serialize};
use url::Url;

/// Locales the portfolio is published in.
///
/// `Es` is the default: pages served without a locale marker in their path
/// are Spanish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Es,
    En,
}

/// Locale used when a request path carries no locale marker.
pub const DEFAULT_LOCALE: Locale = Locale::Es;

impl Locale {
    /// ISO 639-1 two-letter code for this locale.
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Es => "es",
            Locale::En => "en",
        }
    }

    /// Name of the language in the language itself, for language switchers.
    pub fn native_name(&self) -> &'static str {
        match self {
            Locale::Es => "Español",
            Locale::En => "English",
        }
    }

    /// Parse a locale code. Case-sensitive, like the codes used in URLs.
    pub fn from_code(code: &str) -> Option<Locale> {
        match code {
            "es" => Some(Locale::Es),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// All supported locales, default first.
    pub fn all() -> &'static [Locale] {
        &[Locale::Es, Locale::En]
    }

    pub fn is_default(&self) -> bool {
        *self == DEFAULT_LOCALE
    }

    /// Path marker that selects this locale, e.g. `/en`.
    fn path_marker(&self) -> String {
        format!("/{}", self.code())
    }
}

impl Default for Locale {
    fn default() -> Self {
        DEFAULT_LOCALE
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Detect the locale of a page from its URL.
///
/// Only the pathname is inspected; host, query and fragment are ignored.
pub fn detect_locale(url: &Url) -> Locale {
    detect_locale_from_path(url.path())
}

/// Detect the locale of a page from a URL pathname.
///
/// Any occurrence of `/<code>` for a non-default locale selects that locale,
/// so `/en/about`, `/web-portfolio/en` and also `/enterprise` all resolve to
/// English. Sites deployed under a base path rely on the marker being found
/// mid-path. Everything else resolves to [`DEFAULT_LOCALE`].
pub fn detect_locale_from_path(path: &str) -> Locale {
    Locale::all()
        .iter()
        .copied()
        .filter(|locale| !locale.is_default())
        .find(|locale| path.contains(&locale.path_marker()))
        .unwrap_or(DEFAULT_LOCALE)
}

/// Remove the site's deployment base from a pathname.
///
/// `strip_base_path("/energia/en/about", "/energia/")` is `/en/about`. The base
/// only matches on a segment boundary; a path outside the base, or a base of
/// `/`, comes back unchanged. Detection should run on the stripped path so a
/// base such as `/energia` is not mistaken for the `/en` marker.
pub fn strip_base_path<'a>(path: &'a str, base: &str) -> &'a str {
    let base = base.trim_end_matches('/');
    if base.is_empty() {
        return path;
    }
    match path.strip_prefix(base) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}
