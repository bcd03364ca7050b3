// Load-time validation guard rails for catalog files and substitute data sets.
mod support;
#[path = "support/common.rs"]
mod common;

use anyhow::Result;
use openings::{
    CatalogKey, CatalogMetadata, EcoCode, IssueKind, OpeningCatalog, OpeningRecord,
    ValidationError,
};
use serde_json::json;

use common::{catalog_document, opening, write_document};

#[test]
fn load_accepts_well_formed_file() -> Result<()> {
    let file = write_document(&catalog_document(vec![
        opening("Ruy Lopez", "C60", &["e4", "e5", "Nf3", "Nc6", "Bb5"]),
        opening("Sicilian Defense", "B20", &["e4", "c5"]),
        opening("Starting Position", "A00", &[]),
    ]))?;
    let catalog = OpeningCatalog::load(file.path())?;
    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog.key().0, "fixture_v1");
    assert!(catalog.find_by_name("Starting Position").unwrap().moves.is_empty());
    Ok(())
}

#[test]
fn load_reports_every_malformed_record() -> Result<()> {
    let mut missing_description = opening("No Description", "C20", &["e4", "e5"]);
    missing_description
        .as_object_mut()
        .unwrap()
        .remove("description");
    let file = write_document(&catalog_document(vec![
        opening("Ruy Lopez", "C60", &["e4", "e5", "Nf3", "Nc6", "Bb5"]),
        missing_description,
        json!({"name": "Numeric Moves", "eco": "A00", "moves": [1, 2], "description": "bad"}),
        opening("Ruy Lopez", "C61", &["e4"]),
    ]))?;

    let err = OpeningCatalog::load(file.path()).unwrap_err();
    let rendered = format!("{err:#}");
    assert!(rendered.contains(&file.path().display().to_string()));

    let validation = err
        .downcast_ref::<ValidationError>()
        .expect("load should surface a ValidationError");
    assert_eq!(validation.offending_indices(), vec![1, 2, 3]);
    assert_eq!(
        validation.issues()[1].name.as_deref(),
        Some("Numeric Moves")
    );
    assert_eq!(
        validation.issues()[2].kind,
        IssueKind::DuplicateName { first: 0 }
    );
    Ok(())
}

#[test]
fn load_rejects_unknown_schema_version() -> Result<()> {
    let mut document = catalog_document(vec![opening("English Opening", "A10", &["c4"])]);
    document["schema_version"] = json!("opening_catalog_v0");
    let file = write_document(&document)?;
    let err = OpeningCatalog::load(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("not in allowed set"));
    Ok(())
}

#[test]
fn load_rejects_document_extras_via_schema() -> Result<()> {
    let mut document = catalog_document(vec![opening("English Opening", "A10", &["c4"])]);
    document["catalog"]["owner"] = json!("someone");
    let file = write_document(&document)?;
    let err = OpeningCatalog::load(file.path()).unwrap_err();
    assert!(err.downcast_ref::<ValidationError>().is_none());
    assert!(format!("{err:#}").contains("schema validation"));
    Ok(())
}

#[test]
fn load_reports_missing_file_and_bad_json() -> Result<()> {
    let missing = std::env::temp_dir().join("openings-test-does-not-exist.json");
    assert!(OpeningCatalog::load(&missing).is_err());

    let file = tempfile::NamedTempFile::new()?;
    std::fs::write(file.path(), "{ not json")?;
    let err = OpeningCatalog::load(file.path()).unwrap_err();
    assert!(format!("{err:#}").contains("parsing opening catalog"));
    Ok(())
}

#[test]
fn substitute_records_are_validated() {
    let metadata = CatalogMetadata {
        key: CatalogKey("substitute_v1".to_string()),
        title: "substitute".to_string(),
        labels: vec!["test".to_string()],
    };
    let good = OpeningRecord {
        name: "Bird Opening".to_string(),
        eco: EcoCode("A02".to_string()),
        moves: vec!["f4".to_string()],
        description: "Flank opening with f4.".to_string(),
    };
    let catalog = OpeningCatalog::new(metadata.clone(), vec![good.clone()]).unwrap();
    assert_eq!(catalog.find_by_eco("A02"), Some(&good));

    let mut bad = good.clone();
    bad.name = "Bird Opening, From's Gambit".to_string();
    bad.eco = EcoCode("a02".to_string());
    let err = OpeningCatalog::new(metadata, vec![good, bad]).unwrap_err();
    let validation = err.downcast_ref::<ValidationError>().unwrap();
    assert_eq!(validation.offending_indices(), vec![1]);
    assert!(matches!(validation.issues()[0].kind, IssueKind::InvalidEco(_)));
}
