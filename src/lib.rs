//! Reference catalog of named chess openings.
//!
//! The catalog is plain data: an ordered list of [`OpeningRecord`]s checked
//! once at load time and never mutated afterwards. Build an
//! [`OpeningCatalog`] (bundled, from a file, or from your own records) and
//! hand it to whatever renders it.

pub mod catalog;
pub mod config;
pub mod log;
pub mod schema;

pub use catalog::{
    CatalogDocument, CatalogKey, CatalogMetadata, EcoCode, EcoVolume, IssueKind, OpeningCatalog,
    OpeningRecord, RecordIssue, Side, ValidationError,
};
pub use config::{CatalogSource, allowed_schema_versions, default_catalog_path};
pub use schema::{CatalogSchema, SchemaViolation};
