// SPDX-License-Identifier: PMPL-1.0-or-later

//! Internationalisation for the portfolio site.
//!
//! ## Supported locales
//!
//! | Code | Native name | Notes                  |
//! |------|-------------|------------------------|
//! | es   | Español     | default, unprefixed    |
//! | en   | English     | served under `/en`     |
//!
//! ## Design
//!
//! Translation keys use dotted paths into nested JSON dictionaries:
//! `"nav.home"`, `"artwork.price_on_request"`. A key that is missing,
//! addresses a group rather than a string, or holds an empty value resolves
//! to the key itself (fail-open, never panics, never renders blank text).
//! There is no fallback between locales.
//!
//! Dictionaries are immutable after loading, so lookups need no locking.

mod catalog;
mod dictionary;
mod locale;

pub use catalog::{translate, use_translations, Catalog, CoverageGap, Translator};
pub use dictionary::{Dictionary, DictionaryError, Entry};
pub use locale::{detect_locale, detect_locale_from_path, strip_base_path, Locale, DEFAULT_LOCALE};
