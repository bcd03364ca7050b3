//! Opening catalog wiring.
//!
//! This module wraps catalog documents (the bundled
//! `catalogs/openings_v1.json`, or a file supplied at runtime) so consumers
//! can load a validated snapshot once and query it by ECO code, name, volume
//! or move line. Types here mirror the document fields; callers hold an
//! `OpeningCatalog` and pass it by reference.

pub mod index;
pub mod model;
pub mod validate;

pub use index::OpeningCatalog;
pub use model::{
    BUNDLED_CATALOG_JSON, CatalogDocument, CatalogKey, CatalogMetadata, EcoCode, EcoVolume,
    OpeningRecord, Side,
};
pub use validate::{IssueKind, RecordIssue, ValidationError};
