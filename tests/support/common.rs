#![allow(dead_code)]

use anyhow::Result;
use openings::{OpeningCatalog, default_catalog_path};
use serde_json::{Value, json};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

use crate::support::repo_root;

pub const BUNDLED_OPENING_COUNT: usize = 21;

pub fn catalog_path() -> PathBuf {
    default_catalog_path(&repo_root())
}

pub fn bundled() -> OpeningCatalog {
    OpeningCatalog::bundled().expect("bundled catalog should load")
}

pub fn opening(name: &str, eco: &str, moves: &[&str]) -> Value {
    json!({
        "name": name,
        "eco": eco,
        "moves": moves,
        "description": format!("{name} fixture"),
    })
}

pub fn catalog_document(openings: Vec<Value>) -> Value {
    json!({
        "schema_version": "opening_catalog_v1",
        "catalog": {"key": "fixture_v1", "title": "fixture catalog"},
        "openings": openings
    })
}

/// Write `document` to a temp file that lives as long as the handle.
pub fn write_document(document: &Value) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    serde_json::to_writer(&mut file, document)?;
    file.flush()?;
    Ok(file)
}
