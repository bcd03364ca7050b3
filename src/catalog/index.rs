//! Indexed, immutable view of an opening catalog.
//!
//! `OpeningCatalog` is the only way to get at checked records: every
//! constructor validates first and either returns a complete catalog or an
//! error. Records keep declaration order; name and ECO lookups go through maps
//! built once at construction.

use crate::catalog::model::{
    BUNDLED_CATALOG_JSON, CatalogDocument, CatalogKey, CatalogMetadata, EcoCode, EcoVolume,
    OpeningRecord,
};
use crate::catalog::validate::{ValidationError, check_document, record_issues, validate_metadata};
use crate::config::{DEFAULT_SCHEMA_VERSION, allowed_schema_versions};
use crate::log;
use crate::schema::CatalogSchema;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fs;
use std::path::Path;

#[derive(Clone, Debug)]
/// Validated opening records plus lookup maps keyed by name and ECO code.
pub struct OpeningCatalog {
    schema_version: String,
    metadata: CatalogMetadata,
    records: Vec<OpeningRecord>,
    by_name: BTreeMap<String, usize>,
    by_eco: BTreeMap<EcoCode, usize>,
}

impl OpeningCatalog {
    /// Build a catalog from records supplied by the caller.
    ///
    /// Applies the same record checks as a document load and reports every
    /// offending record in one [`ValidationError`].
    pub fn new(metadata: CatalogMetadata, records: Vec<OpeningRecord>) -> Result<Self> {
        validate_metadata(&metadata)?;
        let issues = record_issues(records.iter().enumerate());
        if !issues.is_empty() {
            return Err(ValidationError::from_issues(issues).into());
        }
        Ok(Self::from_checked(
            DEFAULT_SCHEMA_VERSION.to_string(),
            metadata,
            records,
        ))
    }

    /// The catalog embedded in the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_CATALOG_JSON).context("loading bundled opening catalog")
    }

    /// Load a catalog document from disk.
    ///
    /// Record checks run first so a bad entry surfaces as a
    /// [`ValidationError`]; the schema contract then rejects anything the
    /// typed checks do not cover.
    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading opening catalog {}", path.display()))?;
        let value: Value = serde_json::from_str(&data)
            .with_context(|| format!("parsing opening catalog {}", path.display()))?;
        Self::from_checked_value(value).with_context(|| format!("loading {}", path.display()))
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).context("parsing opening catalog JSON")?;
        Self::from_value(value)
    }

    /// Decode and validate a catalog document already parsed as JSON.
    pub fn from_value(value: Value) -> Result<Self> {
        let checked = check_document(value, &allowed_schema_versions())?;
        Ok(Self::from_checked(
            checked.schema_version,
            checked.metadata,
            checked.records,
        ))
    }

    /// Like [`OpeningCatalog::from_value`], additionally enforcing the schema
    /// contract on the whole document.
    pub fn from_checked_value(value: Value) -> Result<Self> {
        let contract = CatalogSchema::bundled()?.validate(&value);
        let catalog = Self::from_value(value)?;
        contract?;
        Ok(catalog)
    }

    fn from_checked(
        schema_version: String,
        metadata: CatalogMetadata,
        records: Vec<OpeningRecord>,
    ) -> Self {
        let mut by_name = BTreeMap::new();
        let mut by_eco: BTreeMap<EcoCode, usize> = BTreeMap::new();
        for (idx, record) in records.iter().enumerate() {
            by_name.insert(record.name.clone(), idx);
            match by_eco.entry(record.eco.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
                Entry::Occupied(slot) => log::warn(format!(
                    "eco {} is shared by '{}' and '{}'; lookups return '{}'",
                    record.eco,
                    records[*slot.get()].name,
                    record.name,
                    records[*slot.get()].name
                )),
            }
        }
        log::debug(format!(
            "catalog {} ready with {} openings",
            metadata.key,
            records.len()
        ));
        Self {
            schema_version,
            metadata,
            records,
            by_name,
            by_eco,
        }
    }

    pub fn key(&self) -> &CatalogKey {
        &self.metadata.key
    }

    pub fn metadata(&self) -> &CatalogMetadata {
        &self.metadata
    }

    pub fn schema_version(&self) -> &str {
        &self.schema_version
    }

    /// Every record in declaration order.
    pub fn list_all(&self) -> &[OpeningRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact, case-sensitive ECO lookup.
    ///
    /// When several records share a code the first declared one wins.
    /// Returns `None` instead of erroring; a missing code is an ordinary
    /// outcome for callers.
    pub fn find_by_eco(&self, code: &str) -> Option<&OpeningRecord> {
        self.by_eco.get(code).map(|&idx| &self.records[idx])
    }

    /// Exact name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<&OpeningRecord> {
        self.by_name.get(name).map(|&idx| &self.records[idx])
    }

    /// Records from one ECO volume, in declaration order.
    pub fn in_volume(&self, volume: EcoVolume) -> impl Iterator<Item = &OpeningRecord> + '_ {
        self.records
            .iter()
            .filter(move |record| record.eco.volume() == Some(volume))
    }

    /// Case-insensitive substring search over names. A blank term matches
    /// nothing.
    pub fn search(&self, term: &str) -> Vec<&OpeningRecord> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.records
            .iter()
            .filter(|record| record.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Records whose moves continue the given line.
    pub fn matching_line<'a, S: AsRef<str>>(
        &'a self,
        line: &'a [S],
    ) -> impl Iterator<Item = &'a OpeningRecord> + 'a {
        self.records
            .iter()
            .filter(move |record| record.continues(line))
    }

    /// The longest named line fully contained in `line`.
    ///
    /// Records with no moves never match; equal-length matches resolve to the
    /// first declared.
    pub fn deepest_match<S: AsRef<str>>(&self, line: &[S]) -> Option<&OpeningRecord> {
        let mut best: Option<&OpeningRecord> = None;
        for record in &self.records {
            if record.moves.is_empty() || !record.is_reached_by(line) {
                continue;
            }
            if best.is_none_or(|current| record.ply_count() > current.ply_count()) {
                best = Some(record);
            }
        }
        best
    }

    /// Serializable form of the whole catalog.
    pub fn document(&self) -> CatalogDocument<'_> {
        CatalogDocument {
            schema_version: &self.schema_version,
            catalog: &self.metadata,
            openings: &self.records,
        }
    }
}
