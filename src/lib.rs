// SPDX-License-Identifier: PMPL-1.0-or-later

//! Artfolio — content schemas and translations for a bilingual art portfolio.
//!
//! The site publishes two collections of artworks ("originals" and "prints")
//! in Spanish and English. This crate owns the two pieces the page builder
//! relies on:
//!
//! 1. **Content**: the validated shape of every artwork record, and loading of
//!    whole collection directories with field-level error reporting.
//! 2. **I18n**: locale detection from request paths and dotted-key lookup in
//!    the locale dictionaries, echoing the key when no text is available.

pub mod config;
pub mod content;
pub mod i18n;
pub mod report;
