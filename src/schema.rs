//! JSON Schema contract for catalog documents.
//!
//! The schema ships inside the crate (`schema/opening_catalog.schema.json`)
//! and is compiled with `jsonschema`. Typed record validation in
//! `catalog::validate` is authoritative for record contents; the schema also
//! rejects document-level extras such as unknown top-level keys.

use anyhow::{Context, Result, anyhow, bail};
use jsonschema::JSONSchema;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::Path;

/// JSON text of the bundled catalog schema.
pub const CATALOG_SCHEMA_JSON: &str = include_str!("../schema/opening_catalog.schema.json");

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON pointer into the checked document, e.g. `/openings/3/eco`.
    pub instance_path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = if self.instance_path.is_empty() {
            "/"
        } else {
            self.instance_path.as_str()
        };
        write!(f, "{path}: {}", self.message)
    }
}

/// Compiled catalog schema.
pub struct CatalogSchema {
    compiled: JSONSchema,
}

impl CatalogSchema {
    pub fn bundled() -> Result<Self> {
        let raw: Value =
            serde_json::from_str(CATALOG_SCHEMA_JSON).context("parsing bundled catalog schema")?;
        Self::compile(&raw).context("compiling bundled catalog schema")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading catalog schema {}", path.display()))?;
        let raw: Value = serde_json::from_str(&data)
            .with_context(|| format!("parsing catalog schema {}", path.display()))?;
        Self::compile(&raw).with_context(|| format!("compiling catalog schema {}", path.display()))
    }

    fn compile(raw: &Value) -> Result<Self> {
        let compiled = JSONSchema::compile(raw).map_err(|err| anyhow!("{err}"))?;
        Ok(Self { compiled })
    }

    /// Every violation in `instance`, in the order the validator reports them.
    pub fn violations(&self, instance: &Value) -> Vec<SchemaViolation> {
        match self.compiled.validate(instance) {
            Ok(()) => Vec::new(),
            Err(errors) => errors
                .map(|err| SchemaViolation {
                    instance_path: err.instance_path.to_string(),
                    message: err.to_string(),
                })
                .collect(),
        }
    }

    pub fn validate(&self, instance: &Value) -> Result<()> {
        let violations = self.violations(instance);
        if violations.is_empty() {
            return Ok(());
        }
        let details = violations
            .iter()
            .map(|violation| format!("  {violation}"))
            .collect::<Vec<_>>()
            .join("\n");
        bail!("catalog document failed schema validation:\n{details}");
    }
}
