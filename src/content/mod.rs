// SPDX-License-Identifier: PMPL-1.0-or-later

//! Content collections for the portfolio.
//!
//! Two collections, `originals` and `prints`, hold one data file per artwork.
//! The [`SchemaRegistry`] binds each collection to a single
//! [`SchemaRevision`], described by a JSON Schema document; records are
//! validated against it and decoded into typed [`Artwork`] values. A failing record names every offending field and
//! what was expected of it.

mod artwork;
mod error;
mod loader;
mod registry;
mod schema;

pub use artwork::{Artwork, BilingualArtwork, LegacyArtwork, LocalizedText};
pub use error::{ContentError, SchemaViolation};
pub use loader::{load_all, load_collection, load_file, CollectionLoad, ContentEntry};
pub use registry::SchemaRegistry;
pub use schema::{check_record, Collection, FieldIssue, SchemaRevision};
