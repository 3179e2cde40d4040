//! Version catalog: named libraries with their coordinates and constraints.
//!
//! The catalog is loaded once from a TOML file and read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use keel_util::errors::{KeelError, KeelResult};

use crate::coordinate::ArtifactCoordinate;
use crate::dependency::{DependencySpec, VersionConstraint};
use crate::family::CatalogKey;

/// On-disk catalog layout: `[versions]` and `[libraries]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub versions: BTreeMap<String, VersionDecl>,
    #[serde(default)]
    pub libraries: BTreeMap<String, CatalogLibrary>,
}

/// A library entry in the catalog file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogLibrary {
    pub group: String,
    pub artifact: String,
    #[serde(default)]
    pub classifier: Option<String>,
    #[serde(default)]
    pub version: Option<VersionDecl>,
}

/// A version as written in the catalog: either a plain string or a table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VersionDecl {
    Plain(String),
    Rich(RichVersion),
}

/// `{ strictly = "..." }`, `{ prefer = "..." }` or `{ ref = "..." }`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RichVersion {
    #[serde(default)]
    pub strictly: Option<String>,
    #[serde(default)]
    pub prefer: Option<String>,
    #[serde(default, rename = "ref")]
    pub reference: Option<String>,
}

/// A resolved catalog library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub coordinate: ArtifactCoordinate,
    pub constraint: VersionConstraint,
}

impl CatalogEntry {
    pub fn to_dependency(&self) -> DependencySpec {
        DependencySpec::new(self.coordinate.clone()).with_constraint(self.constraint.clone())
    }
}

/// Read-only lookup table from library name to coordinate and constraint.
#[derive(Debug, Clone, Default)]
pub struct VersionCatalog {
    entries: BTreeMap<String, CatalogEntry>,
}

impl VersionCatalog {
    /// Resolve every library's version declaration, following `ref`s into
    /// `[versions]`. A dangling ref or a missing version is an error.
    pub fn from_config(config: &CatalogConfig) -> Result<Self, KeelError> {
        let mut entries = BTreeMap::new();
        for (name, lib) in &config.libraries {
            let decl = lib.version.as_ref().ok_or_else(|| KeelError::Catalog {
                message: format!("library '{name}' declares no version"),
            })?;
            let constraint = resolve_decl(name, decl, &config.versions, 0)?;
            let mut coordinate = ArtifactCoordinate::new(&lib.group, &lib.artifact);
            coordinate.classifier = lib.classifier.clone();
            entries.insert(
                name.clone(),
                CatalogEntry {
                    coordinate,
                    constraint,
                },
            );
        }
        tracing::debug!(libraries = entries.len(), "loaded version catalog");
        Ok(Self { entries })
    }

    /// Parse a catalog from TOML text.
    pub fn from_str(content: &str) -> KeelResult<Self> {
        let config: CatalogConfig = toml::from_str(content).map_err(|e| KeelError::Catalog {
            message: format!("Failed to parse catalog: {e}"),
        })?;
        Ok(Self::from_config(&config)?)
    }

    pub fn from_path(path: &Path) -> KeelResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| KeelError::Catalog {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_str(&content)
    }

    /// Insert or replace a library; used when assembling catalogs in code.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        coordinate: ArtifactCoordinate,
        constraint: VersionConstraint,
    ) {
        self.entries.insert(
            name.into(),
            CatalogEntry {
                coordinate,
                constraint,
            },
        );
    }

    /// The version constraint of library `name`.
    pub fn lookup(&self, name: &str) -> Result<&VersionConstraint, KeelError> {
        self.entry(name).map(|e| &e.constraint)
    }

    pub fn entry(&self, name: &str) -> Result<&CatalogEntry, KeelError> {
        tracing::trace!(name, "catalog lookup");
        self.entries
            .get(name)
            .ok_or_else(|| KeelError::not_found("library", name))
    }

    pub fn lookup_key(&self, key: &CatalogKey) -> Result<&CatalogEntry, KeelError> {
        self.entry(&key.lookup_name())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

// Version aliases may chain; bound the walk so a cycle cannot loop forever.
const MAX_REF_DEPTH: usize = 8;

fn resolve_decl(
    name: &str,
    decl: &VersionDecl,
    versions: &BTreeMap<String, VersionDecl>,
    depth: usize,
) -> Result<VersionConstraint, KeelError> {
    if depth > MAX_REF_DEPTH {
        return Err(KeelError::Catalog {
            message: format!("version reference chain for '{name}' is too deep or cyclic"),
        });
    }
    match decl {
        VersionDecl::Plain(v) => non_empty(name, v).map(VersionConstraint::Preferred),
        VersionDecl::Rich(rich) => {
            if let Some(ref v) = rich.strictly {
                return non_empty(name, v).map(VersionConstraint::Strict);
            }
            if let Some(ref v) = rich.prefer {
                return non_empty(name, v).map(VersionConstraint::Preferred);
            }
            if let Some(ref vref) = rich.reference {
                let target = versions.get(vref).ok_or_else(|| KeelError::Catalog {
                    message: format!("library '{name}' refers to undefined version '{vref}'"),
                })?;
                return resolve_decl(name, target, versions, depth + 1);
            }
            Err(KeelError::Catalog {
                message: format!("version of '{name}' needs one of 'strictly', 'prefer' or 'ref'"),
            })
        }
    }
}

fn non_empty(name: &str, version: &str) -> Result<String, KeelError> {
    if version.trim().is_empty() {
        Err(KeelError::Catalog {
            message: format!("empty version for '{name}'"),
        })
    } else {
        Ok(version.to_string())
    }
}
