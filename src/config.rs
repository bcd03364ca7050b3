//! Runtime configuration for catalog consumers.
//!
//! Configuration comes from the environment with CLI overrides layered on top:
//! `OPENINGS_CATALOG` names a catalog file to use instead of the bundled one,
//! and `OPENINGS_ALLOWED_CATALOG_SCHEMAS` widens the accepted
//! `schema_version` set (comma separated).

use crate::catalog::OpeningCatalog;
use crate::log;
use anyhow::Result;
use std::collections::BTreeSet;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// The only document version the bundled catalog is written against.
pub const DEFAULT_SCHEMA_VERSION: &str = "opening_catalog_v1";
pub const ENV_CATALOG: &str = "OPENINGS_CATALOG";
pub const ENV_ALLOWED_SCHEMA_VERSIONS: &str = "OPENINGS_ALLOWED_CATALOG_SCHEMAS";

/// Relative path of the bundled catalog inside the repository.
pub const DEFAULT_CATALOG_PATH: &str = "catalogs/openings_v1.json";

pub fn default_catalog_path(repo_root: &Path) -> PathBuf {
    repo_root.join(DEFAULT_CATALOG_PATH)
}

/// Accepted `schema_version` values, including any added via the environment.
pub fn allowed_schema_versions() -> BTreeSet<String> {
    allowed_schema_versions_from(env::var(ENV_ALLOWED_SCHEMA_VERSIONS).ok().as_deref())
}

pub fn allowed_schema_versions_from(extra: Option<&str>) -> BTreeSet<String> {
    let mut versions = BTreeSet::new();
    versions.insert(DEFAULT_SCHEMA_VERSION.to_string());
    if let Some(raw) = extra {
        for v in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            versions.insert(v.to_string());
        }
    }
    versions
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Where the active catalog comes from.
pub enum CatalogSource {
    Bundled,
    File(PathBuf),
}

impl CatalogSource {
    /// Resolve from an optional CLI path, falling back to `OPENINGS_CATALOG`.
    pub fn from_env(cli_path: Option<PathBuf>) -> Self {
        Self::resolve(cli_path, env::var_os(ENV_CATALOG))
    }

    pub fn resolve(cli_path: Option<PathBuf>, env_value: Option<OsString>) -> Self {
        if let Some(path) = cli_path {
            return CatalogSource::File(path);
        }
        match env_value {
            Some(value) if !value.is_empty() => CatalogSource::File(PathBuf::from(value)),
            Some(_) => {
                log::warn(format!("{ENV_CATALOG} is set but empty; using bundled catalog"));
                CatalogSource::Bundled
            }
            None => CatalogSource::Bundled,
        }
    }

    /// Load and validate the catalog this source points at.
    pub fn open(&self) -> Result<OpeningCatalog> {
        match self {
            CatalogSource::Bundled => OpeningCatalog::bundled(),
            CatalogSource::File(path) => OpeningCatalog::load(path),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            CatalogSource::Bundled => "bundled catalog".to_string(),
            CatalogSource::File(path) => path.display().to_string(),
        }
    }
}
