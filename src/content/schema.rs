// SPDX-License-Identifier: PMPL-1.0-or-later

//! JSON Schema documents for the artwork collections.
//!
//! Each [`SchemaRevision`] is described by a JSON Schema under `schemas/`,
//! embedded at compile time and compiled once per process. [`check_record`]
//! runs a parsed record through the compiled validator and turns every
//! validation error into a [`FieldIssue`] with a dotted field path, so a
//! content author sees all problems in one pass.

use jsonschema::Validator;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;

const LEGACY_SCHEMA: &str = include_str!("../../schemas/legacy.schema.json");
const BILINGUAL_SCHEMA: &str = include_str!("../../schemas/bilingual.schema.json");

static LEGACY: OnceLock<Result<CompiledSchema, String>> = OnceLock::new();
static BILINGUAL: OnceLock<Result<CompiledSchema, String>> = OnceLock::new();

/// A named content collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Originals,
    Prints,
}

impl Collection {
    /// Directory name under the content root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Collection::Originals => "originals",
            Collection::Prints => "prints",
        }
    }

    pub fn all() -> &'static [Collection] {
        &[Collection::Originals, Collection::Prints]
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Which record shape a collection enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaRevision {
    /// Single-language title and description, required price and medium.
    Legacy,
    /// `{es, en}` title and description, optional price.
    #[default]
    Bilingual,
}

impl SchemaRevision {
    pub fn as_str(self) -> &'static str {
        match self {
            SchemaRevision::Legacy => "legacy",
            SchemaRevision::Bilingual => "bilingual",
        }
    }

    /// The JSON Schema document for this revision, as shipped in `schemas/`.
    pub fn schema_source(self) -> &'static str {
        match self {
            SchemaRevision::Legacy => LEGACY_SCHEMA,
            SchemaRevision::Bilingual => BILINGUAL_SCHEMA,
        }
    }

    fn compiled(self) -> Result<&'static CompiledSchema, &'static str> {
        let cell = match self {
            SchemaRevision::Legacy => &LEGACY,
            SchemaRevision::Bilingual => &BILINGUAL,
        };
        cell.get_or_init(|| {
            CompiledSchema::compile(self.schema_source()).inspect_err(|err| {
                tracing::error!(revision = self.as_str(), %err, "embedded schema unusable");
            })
        })
        .as_ref()
        .map_err(String::as_str)
    }
}

impl fmt::Display for SchemaRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct CompiledSchema {
    document: Value,
    validator: Validator,
}

impl CompiledSchema {
    fn compile(source: &str) -> Result<Self, String> {
        let document: Value = serde_json::from_str(source).map_err(|err| err.to_string())?;
        let validator = jsonschema::validator_for(&document).map_err(|err| err.to_string())?;
        Ok(Self {
            document,
            validator,
        })
    }
}

/// One field that does not match its declared shape.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct FieldIssue {
    /// Dotted path of the offending field, e.g. `title.en`.
    pub path: String,
    pub expected: String,
    /// JSON kind actually found, or `missing`.
    pub found: String,
}

impl FieldIssue {
    pub(crate) fn new(path: impl Into<String>, expected: &str, found: &str) -> Self {
        Self {
            path: path.into(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    pub fn is_missing(&self) -> bool {
        self.found == MISSING
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            write!(f, "`{}` is required (expected {})", self.path, self.expected)
        } else {
            write!(
                f,
                "`{}` expected {}, received {}",
                self.path, self.expected, self.found
            )
        }
    }
}

const MISSING: &str = "missing";
pub(crate) const ROOT_PATH: &str = "(record)";

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Check `record` against a revision's JSON Schema. Extra fields are ignored.
///
/// Issues come back sorted by path, without duplicates.
pub fn check_record(revision: SchemaRevision, record: &Value) -> Vec<FieldIssue> {
    let schema = match revision.compiled() {
        Ok(schema) => schema,
        Err(message) => return vec![FieldIssue::new(ROOT_PATH, revision.as_str(), message)],
    };

    let mut issues: Vec<FieldIssue> = schema
        .validator
        .iter_errors(record)
        .flat_map(|error| {
            let instance_path = error.instance_path.to_string();
            let schema_path = error.schema_path.to_string();
            issues_for(&schema.document, record, &instance_path, &schema_path)
        })
        .collect();
    issues.sort();
    issues.dedup();
    issues
}

/// Translate one validation error, located by its instance and schema
/// pointers, into field issues.
fn issues_for(document: &Value, record: &Value, instance_path: &str, schema_path: &str) -> Vec<FieldIssue> {
    let instance = record.pointer(instance_path).unwrap_or(&Value::Null);
    let (parent, keyword) = schema_path.rsplit_once('/').unwrap_or(("", schema_path));

    if keyword == "required" {
        // One error per absent name; report them all here and let dedup fold repeats.
        let names = document.pointer(schema_path).and_then(Value::as_array);
        let present = instance.as_object();
        return names
            .into_iter()
            .flatten()
            .filter_map(Value::as_str)
            .filter(|name| present.map_or(true, |object| !object.contains_key(*name)))
            .map(|name| {
                let expected = declared_type(document, &format!("{}/properties/{}", parent, escape(name)));
                FieldIssue::new(child_path(instance_path, name), expected, MISSING)
            })
            .collect();
    }

    let expected = match keyword {
        "type" => declared_type(document, parent),
        other => other,
    };
    vec![FieldIssue::new(dotted(instance_path), expected, kind_of(instance))]
}

fn declared_type<'a>(document: &'a Value, schema_path: &str) -> &'a str {
    document
        .pointer(&format!("{}/type", schema_path))
        .and_then(Value::as_str)
        .unwrap_or("value")
}

/// `/title/en` -> `title.en`; the empty pointer names the whole record.
fn dotted(pointer: &str) -> String {
    if pointer.is_empty() {
        return ROOT_PATH.to_string();
    }
    pointer
        .trim_start_matches('/')
        .split('/')
        .map(|segment| segment.replace("~1", "/").replace("~0", "~"))
        .collect::<Vec<_>>()
        .join(".")
}

fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", dotted(parent), name)
    }
}

fn escape(name: &str) -> String {
    name.replace('~', "~0").replace('/', "~1")
}
