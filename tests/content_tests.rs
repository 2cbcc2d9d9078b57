// SPDX-License-Identifier: PMPL-1.0-or-later

//! Tests for collection loading and validation reports

use artfolio::content::{self, Collection, ContentError, SchemaRegistry, SchemaRevision};
use artfolio::i18n::Locale;
use artfolio::report::{self, ReportOutputFormat, ValidationReport};
use proptest::prelude::*;
use serde_json::json;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const MAR_JSON: &str = r#"{
  "title": { "es": "Mar en calma", "en": "Calm sea" },
  "description": { "es": "Óleo sobre lienzo", "en": "Oil on canvas" },
  "price": "1200 €",
  "year": 2023,
  "dimensions": "80x100 cm",
  "image": "/images/originals/mar.jpg"
}"#;

const NOCHE_YAML: &str = r#"
title:
  es: Noche
  en: Night
description:
  es: Lámina giclée
  en: Giclée print
year: 2021
dimensions: 30x40 cm
image: /images/prints/noche.jpg
available: false
"#;

fn write(root: &Path, relative: &str, body: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

#[test]
fn test_load_json_and_yaml() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "originals/mar.json", MAR_JSON);
    write(dir.path(), "prints/noche.yaml", NOCHE_YAML);

    let registry = SchemaRegistry::default();
    let originals = content::load_collection(dir.path(), Collection::Originals, &registry).unwrap();
    assert!(originals.is_valid());
    assert_eq!(originals.entries.len(), 1);
    assert_eq!(originals.entries[0].id, "mar");
    assert_eq!(originals.entries[0].data.title_for(Locale::En), "Calm sea");
    assert!(originals.entries[0].data.available());

    let prints = content::load_collection(dir.path(), Collection::Prints, &registry).unwrap();
    let entries = prints.into_entries().unwrap();
    assert_eq!(entries[0].data.title_for(Locale::Es), "Noche");
    assert!(!entries[0].data.available());
    assert_eq!(entries[0].data.price(), None);
}

#[test]
fn test_missing_year_names_field_and_file() {
    let dir = TempDir::new().unwrap();
    let without_year = MAR_JSON.replace("\"year\": 2023,", "");
    write(dir.path(), "originals/sin-fecha.json", &without_year);

    let load =
        content::load_collection(dir.path(), Collection::Originals, &SchemaRegistry::default()).unwrap();
    assert!(load.entries.is_empty());
    assert_eq!(load.failures.len(), 1);

    let failure = &load.failures[0];
    assert!(matches!(failure, ContentError::Schema { .. }));
    assert_eq!(failure.issues()[0].path, "year");
    let message = failure.to_string();
    assert!(message.contains("sin-fecha.json"), "{}", message);
    assert!(message.contains("`year`"), "{}", message);
}

#[test]
fn test_fractional_year_loads() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "originals/mar.json", &MAR_JSON.replace("2023,", "2023.0,"));
    write(dir.path(), "prints/noche.yaml", &NOCHE_YAML.replace("2021", "2022.5"));

    let loads = content::load_all(dir.path(), &SchemaRegistry::default()).unwrap();
    assert!(loads.iter().all(|l| l.is_valid()));
    assert_eq!(loads[0].entries[0].data.year(), 2023.0);
    assert_eq!(loads[1].entries[0].data.year(), 2022.5);
}

#[cfg(unix)]
#[test]
fn test_walk_errors_are_collected() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "originals/mar.json", MAR_JSON);
    // A link back to its own parent makes the followed walk report a loop.
    std::os::unix::fs::symlink(dir.path().join("originals"), dir.path().join("originals/vuelta")).unwrap();

    let load =
        content::load_collection(dir.path(), Collection::Originals, &SchemaRegistry::default()).unwrap();
    assert_eq!(load.entries.len(), 1);
    assert_eq!(load.entries[0].id, "mar");
    assert_eq!(load.failures.len(), 1);
    assert!(matches!(&load.failures[0], ContentError::Walk { .. }));
    assert!(load.failures[0].path().ends_with("vuelta"));
}

#[test]
fn test_parse_errors_are_collected() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "originals/mar.json", MAR_JSON);
    write(dir.path(), "originals/roto.json", "{ \"title\": ");
    write(dir.path(), "originals/roto-yaml.yml", "title: [unclosed");

    let load =
        content::load_collection(dir.path(), Collection::Originals, &SchemaRegistry::default()).unwrap();
    assert_eq!(load.entries.len(), 1);
    assert_eq!(load.failures.len(), 2);
    assert!(load
        .failures
        .iter()
        .any(|f| matches!(f, ContentError::Json { .. })));
    assert!(load
        .failures
        .iter()
        .any(|f| matches!(f, ContentError::Yaml { .. })));
}

#[test]
fn test_missing_collection_dir_is_empty() {
    let dir = TempDir::new().unwrap();
    let load =
        content::load_collection(dir.path(), Collection::Prints, &SchemaRegistry::default()).unwrap();
    assert!(load.is_valid());
    assert!(load.entries.is_empty());
}

#[test]
fn test_collection_path_is_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "prints", "not a directory");
    let result = content::load_collection(dir.path(), Collection::Prints, &SchemaRegistry::default());
    assert!(matches!(result, Err(ContentError::NotADirectory(_))));
}

#[test]
fn test_skips_ignored_and_foreign_files() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "originals/mar.json", MAR_JSON);
    write(dir.path(), "originals/_borrador.json", "{}");
    write(dir.path(), "originals/.hidden.json", "{}");
    write(dir.path(), "originals/mar.jpg", "binary");
    write(dir.path(), "originals/notas.md", "# notas");

    let load =
        content::load_collection(dir.path(), Collection::Originals, &SchemaRegistry::default()).unwrap();
    assert!(load.is_valid());
    assert_eq!(load.entries.len(), 1);
}

#[test]
fn test_nested_ids_and_duplicates() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "prints/2021/noche.yaml", NOCHE_YAML);
    write(dir.path(), "prints/alba.json", MAR_JSON);
    write(dir.path(), "prints/alba.yaml", NOCHE_YAML);

    let load =
        content::load_collection(dir.path(), Collection::Prints, &SchemaRegistry::default()).unwrap();
    let ids: Vec<&str> = load.entries.iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["2021/noche", "alba"]);
    assert_eq!(load.failures.len(), 1);
    assert!(matches!(
        &load.failures[0],
        ContentError::DuplicateId { id, .. } if id == "alba"
    ));
}

#[test]
fn test_legacy_revision_per_collection() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "prints/antiguo.json",
        r#"{
          "title": "Antiguo",
          "description": "Serigrafía",
          "price": "80 €",
          "year": 2015,
          "dimensions": "20x30 cm",
          "medium": "Serigrafía",
          "image": "/images/prints/antiguo.jpg"
        }"#,
    );
    write(dir.path(), "originals/mar.json", MAR_JSON);

    let registry = SchemaRegistry::default().with_revision(Collection::Prints, SchemaRevision::Legacy);
    let loads = content::load_all(dir.path(), &registry).unwrap();
    assert_eq!(loads.len(), 2);
    assert!(loads.iter().all(|l| l.is_valid()));
    let prints = loads.iter().find(|l| l.collection == Collection::Prints).unwrap();
    assert_eq!(prints.revision, SchemaRevision::Legacy);
    assert_eq!(prints.entries[0].data.revision(), SchemaRevision::Legacy);
}

#[test]
fn test_validation_report_written() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "originals/mar.json", MAR_JSON);
    write(dir.path(), "prints/malo.json", r#"{ "year": "2020" }"#);

    let loads = content::load_all(dir.path(), &SchemaRegistry::default()).unwrap();
    let report = ValidationReport::from_loads(dir.path(), &loads);
    assert!(!report.is_clean());
    assert_eq!(report.total_valid, 1);
    assert_eq!(report.total_failures, 1);

    let output = dir.path().join("out/report.json");
    report::write_report(&report, &output, ReportOutputFormat::Json).unwrap();
    let parsed: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(parsed["total_failures"], 1);
    let prints = &parsed["collections"][1];
    assert_eq!(prints["collection"], "prints");
    assert_eq!(prints["revision"], "bilingual");
    let paths: Vec<&str> = prints["failures"][0]["issues"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["path"].as_str().unwrap())
        .collect();
    assert!(paths.contains(&"year"));
    assert!(paths.contains(&"title"));

    let yaml = dir.path().join("report.yaml");
    report::write_report(&report, &yaml, ReportOutputFormat::Yaml).unwrap();
    assert!(fs::read_to_string(&yaml).unwrap().contains("total_valid: 1"));
}

fn bilingual_record() -> impl Strategy<Value = serde_json::Value> {
    let year = prop_oneof![
        (-5000.0f64..5000.0).prop_map(|y| json!(y)),
        (1900i64..2100).prop_map(|y| json!(y)),
        "[0-9]{4}".prop_map(|y| json!(y)),
    ];
    (
        ".{0,12}",
        proptest::option::of(".{0,12}"),
        year,
        proptest::option::of(any::<bool>()),
        proptest::option::of(".{0,8}"),
    )
        .prop_map(|(title, english, year, available, price)| {
            let mut record = json!({
                "title": { "es": title },
                "description": { "es": "Óleo", "en": "Oil" },
                "year": year,
                "dimensions": "50x70 cm",
                "image": "/images/mar.jpg"
            });
            if let Some(english) = english {
                record["title"]["en"] = json!(english);
            }
            if let Some(available) = available {
                record["available"] = json!(available);
            }
            if let Some(price) = price {
                record["price"] = json!(price);
            }
            record
        })
}

proptest! {
    #[test]
    fn prop_validation_is_idempotent(record in bilingual_record()) {
        let registry = SchemaRegistry::default();
        let first = registry.validate(Collection::Originals, &record);
        let second = registry.validate(Collection::Originals, &record);
        prop_assert_eq!(&first, &second);

        let complete = record["title"].get("en").is_some() && record["year"].is_number();
        prop_assert_eq!(first.is_ok(), complete);
    }
}
