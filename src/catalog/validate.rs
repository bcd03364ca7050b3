//! Load-time checks for catalog documents.
//!
//! Document-level problems (unknown schema version, bad catalog key) fail
//! immediately. Record-level problems are collected across the whole document
//! and reported together as a single [`ValidationError`], so one bad entry
//! never hides another and no partially-checked record reaches a consumer.

use crate::catalog::model::{CatalogKey, CatalogMetadata, OpeningRecord, is_well_formed_eco};
use crate::log;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IssueKind {
    /// The entry could not be decoded: missing field, wrong type, or an
    /// unknown field.
    Malformed(String),
    EmptyName,
    EmptyDescription,
    InvalidEco(String),
    EmptyMove { ply: usize },
    MoveHasWhitespace { ply: usize, token: String },
    DuplicateName { first: usize },
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueKind::Malformed(detail) => write!(f, "malformed record: {detail}"),
            IssueKind::EmptyName => f.write_str("name must not be empty"),
            IssueKind::EmptyDescription => f.write_str("description must not be empty"),
            IssueKind::InvalidEco(eco) => {
                write!(f, "eco '{eco}' must be a letter A-E followed by two digits")
            }
            IssueKind::EmptyMove { ply } => write!(f, "move at ply {ply} is empty"),
            IssueKind::MoveHasWhitespace { ply, token } => {
                write!(f, "move '{token}' at ply {ply} contains whitespace")
            }
            IssueKind::DuplicateName { first } => {
                write!(f, "name already used by openings[{first}]")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// A problem with one entry of the `openings` array.
pub struct RecordIssue {
    /// Zero-based position in the document.
    pub index: usize,
    pub name: Option<String>,
    pub kind: IssueKind,
}

impl fmt::Display for RecordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "openings[{}] ('{}'): {}", self.index, name, self.kind),
            None => write!(f, "openings[{}]: {}", self.index, self.kind),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Every record-level problem found while loading a catalog.
pub struct ValidationError {
    issues: Vec<RecordIssue>,
}

impl ValidationError {
    pub(crate) fn from_issues(mut issues: Vec<RecordIssue>) -> Self {
        issues.sort_by_key(|issue| issue.index);
        Self { issues }
    }

    pub fn issues(&self) -> &[RecordIssue] {
        &self.issues
    }

    /// Positions of the rejected records, ascending and deduplicated.
    pub fn offending_indices(&self) -> Vec<usize> {
        let indices: BTreeSet<usize> = self.issues.iter().map(|issue| issue.index).collect();
        indices.into_iter().collect()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} invalid opening record(s)",
            self.offending_indices().len()
        )?;
        for issue in &self.issues {
            write!(f, "\n  - {issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Deserialize)]
struct RawCatalogDocument {
    schema_version: String,
    catalog: CatalogMetadata,
    openings: Vec<Value>,
}

pub(crate) struct CheckedDocument {
    pub schema_version: String,
    pub metadata: CatalogMetadata,
    pub records: Vec<OpeningRecord>,
}

/// Decode and check a whole catalog document.
pub(crate) fn check_document(value: Value, allowed: &BTreeSet<String>) -> Result<CheckedDocument> {
    let raw: RawCatalogDocument = serde_json::from_value(value)
        .context("catalog document must carry schema_version, catalog and openings")?;
    validate_schema_version(&raw.schema_version, allowed)?;
    validate_metadata(&raw.catalog)?;

    let mut issues = Vec::new();
    let mut decoded = Vec::with_capacity(raw.openings.len());
    for (index, entry) in raw.openings.into_iter().enumerate() {
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
            .map(str::to_string);
        match serde_json::from_value::<OpeningRecord>(entry) {
            Ok(record) => decoded.push((index, record)),
            Err(err) => issues.push(RecordIssue {
                index,
                name,
                kind: IssueKind::Malformed(err.to_string()),
            }),
        }
    }
    issues.extend(record_issues(
        decoded.iter().map(|(index, record)| (*index, record)),
    ));

    if !issues.is_empty() {
        return Err(ValidationError::from_issues(issues).into());
    }

    log::debug(format!(
        "validated {} opening records for catalog {}",
        decoded.len(),
        raw.catalog.key
    ));
    Ok(CheckedDocument {
        schema_version: raw.schema_version,
        metadata: raw.catalog,
        records: decoded.into_iter().map(|(_, record)| record).collect(),
    })
}

/// Check already-decoded records, returning every issue found.
pub(crate) fn record_issues<'a>(
    records: impl IntoIterator<Item = (usize, &'a OpeningRecord)>,
) -> Vec<RecordIssue> {
    let mut issues = Vec::new();
    let mut first_seen: BTreeMap<&'a str, usize> = BTreeMap::new();

    for (index, record) in records {
        let name = (!record.name.trim().is_empty()).then(|| record.name.clone());
        let mut push = |kind| {
            issues.push(RecordIssue {
                index,
                name: name.clone(),
                kind,
            })
        };

        if name.is_none() {
            push(IssueKind::EmptyName);
        }
        if record.description.trim().is_empty() {
            push(IssueKind::EmptyDescription);
        }
        if !is_well_formed_eco(record.eco.as_str()) {
            push(IssueKind::InvalidEco(record.eco.0.clone()));
        }
        for (ply, token) in record.moves.iter().enumerate() {
            if token.is_empty() {
                push(IssueKind::EmptyMove { ply: ply + 1 });
            } else if token.chars().any(char::is_whitespace) {
                push(IssueKind::MoveHasWhitespace {
                    ply: ply + 1,
                    token: token.clone(),
                });
            }
        }
        if name.is_some() {
            match first_seen.get(record.name.as_str()) {
                Some(&first) => push(IssueKind::DuplicateName { first }),
                None => {
                    first_seen.insert(record.name.as_str(), index);
                }
            }
        }
    }
    issues
}

pub(crate) fn validate_schema_version(
    schema_version: &str,
    allowed: &BTreeSet<String>,
) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }
    if !is_identifier(schema_version) {
        bail!(
            "schema_version must match ^[A-Za-z0-9_.-]+$, got {}",
            schema_version
        );
    }
    if !allowed.contains(schema_version) {
        bail!(
            "schema_version '{}' not in allowed set {:?}",
            schema_version,
            allowed
        );
    }
    Ok(())
}

pub(crate) fn validate_metadata(meta: &CatalogMetadata) -> Result<()> {
    validate_catalog_key(&meta.key)?;
    if meta.title.trim().is_empty() {
        bail!("catalog.title must not be empty");
    }
    if meta.labels.iter().any(|label| label.trim().is_empty()) {
        bail!("catalog.labels must not contain empty entries");
    }
    Ok(())
}

fn validate_catalog_key(key: &CatalogKey) -> Result<()> {
    if key.0.is_empty() {
        bail!("catalog.key must not be empty");
    }
    if !is_identifier(&key.0) {
        bail!("catalog.key must match ^[A-Za-z0-9_.-]+$, got {}", key.0);
    }
    Ok(())
}

fn is_identifier(raw: &str) -> bool {
    raw.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}
