// SPDX-License-Identifier: PMPL-1.0-or-later

//! Collection → schema revision bindings.

use super::artwork::{Artwork, BilingualArtwork, LegacyArtwork};
use super::error::SchemaViolation;
use super::schema::{check_record, Collection, FieldIssue, SchemaRevision, ROOT_PATH};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Binds every collection to exactly one schema revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaRegistry {
    originals: SchemaRevision,
    prints: SchemaRevision,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self {
            originals: SchemaRevision::Bilingual,
            prints: SchemaRevision::Bilingual,
        }
    }
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_revision(mut self, collection: Collection, revision: SchemaRevision) -> Self {
        match collection {
            Collection::Originals => self.originals = revision,
            Collection::Prints => self.prints = revision,
        }
        self
    }

    pub fn revision(&self, collection: Collection) -> SchemaRevision {
        match collection {
            Collection::Originals => self.originals,
            Collection::Prints => self.prints,
        }
    }

    /// Validate a parsed record against the collection's active revision.
    ///
    /// All field issues are collected before failing. Validation has no side
    /// effects: the same input always yields the same result.
    pub fn validate(&self, collection: Collection, record: &Value) -> Result<Artwork, SchemaViolation> {
        let revision = self.revision(collection);
        let violation = |issues| SchemaViolation {
            collection,
            revision,
            issues,
        };

        let issues = check_record(revision, record);
        if !issues.is_empty() {
            return Err(violation(issues));
        }

        let decoded = match revision {
            SchemaRevision::Legacy => decode::<LegacyArtwork>(record).map(Artwork::Legacy),
            SchemaRevision::Bilingual => decode::<BilingualArtwork>(record).map(Artwork::Bilingual),
        };
        decoded.map_err(|issue| violation(vec![issue]))
    }
}

fn decode<T: DeserializeOwned>(record: &Value) -> Result<T, FieldIssue> {
    serde_json::from_value(record.clone())
        .map_err(|err| FieldIssue::new(ROOT_PATH, "artwork record", &err.to_string()))
}
