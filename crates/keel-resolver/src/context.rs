//! Local-or-published selection of cross-module references.
//!
//! A regular build refers to sibling modules by project path. When
//! integrations testing is enabled the consuming modules live in a separate
//! build, so the same references must point at published artifacts instead.

use serde::Serialize;
use std::fmt;

use keel_core::config::{BuildSettings, ResolutionMode};
use keel_core::coordinate::ArtifactCoordinate;
use keel_core::dependency::VersionConstraint;
use keel_core::version_catalog::VersionCatalog;
use keel_util::errors::KeelError;

pub const SERVER_MODULE: &str = "nessie-quarkus";
pub const SERVER_RUNNER_CONFIGURATION: &str = "quarkusRunner";

/// An opaque reference handed to the build engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DependencyReference {
    /// A module of the same build, e.g. `:nessie-client`.
    Project {
        path: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        configuration: Option<String>,
    },
    /// A published artifact at a catalog-managed version.
    Module {
        coordinate: ArtifactCoordinate,
        #[serde(skip_serializing_if = "Option::is_none")]
        configuration: Option<String>,
        constraint: VersionConstraint,
    },
}

impl fmt::Display for DependencyReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project {
                path,
                configuration,
            } => match configuration {
                Some(c) => write!(f, "project({path}, {c})"),
                None => write!(f, "project({path})"),
            },
            Self::Module {
                coordinate,
                configuration,
                constraint,
            } => {
                write!(f, "{coordinate}:{constraint}")?;
                if let Some(c) = configuration {
                    write!(f, " ({c})")?;
                }
                Ok(())
            }
        }
    }
}

pub struct ContextSwitch<'a> {
    mode: ResolutionMode,
    group: String,
    catalog: &'a VersionCatalog,
}

impl<'a> ContextSwitch<'a> {
    pub fn new(mode: ResolutionMode, group: impl Into<String>, catalog: &'a VersionCatalog) -> Self {
        Self {
            mode,
            group: group.into(),
            catalog,
        }
    }

    pub fn from_settings(settings: &BuildSettings, catalog: &'a VersionCatalog) -> Self {
        Self::new(settings.mode, settings.published_group.clone(), catalog)
    }

    pub fn mode(&self) -> ResolutionMode {
        self.mode
    }

    /// Reference module `artifact_id`, optionally a named configuration of it.
    ///
    /// Only the `External` branch can fail, when the catalog has no entry
    /// named `artifact_id`.
    pub fn resolve_reference(
        &self,
        artifact_id: &str,
        configuration: Option<&str>,
    ) -> Result<DependencyReference, KeelError> {
        let reference = match self.mode {
            ResolutionMode::Local => DependencyReference::Project {
                path: format!(":{artifact_id}"),
                configuration: configuration.map(str::to_string),
            },
            ResolutionMode::External => DependencyReference::Module {
                coordinate: ArtifactCoordinate::new(&self.group, artifact_id),
                configuration: configuration.map(str::to_string),
                constraint: self.catalog.lookup(artifact_id)?.clone(),
            },
        };
        tracing::debug!(mode = %self.mode, %reference, "resolved module reference");
        Ok(reference)
    }

    /// The server's runnable output, for tests that start a server.
    pub fn server_runner(&self) -> Result<DependencyReference, KeelError> {
        self.resolve_reference(SERVER_MODULE, Some(SERVER_RUNNER_CONFIGURATION))
    }

    /// A client library for downstream consumers.
    ///
    /// A regular build compiles consumers against the last published client,
    /// whose version is catalog entry `version_key`. Under integrations
    /// testing the client comes from the build under test, as with
    /// [`resolve_reference`](Self::resolve_reference).
    pub fn pinned_client(
        &self,
        artifact_id: &str,
        version_key: &str,
    ) -> Result<DependencyReference, KeelError> {
        match self.mode {
            ResolutionMode::Local => Ok(DependencyReference::Module {
                coordinate: ArtifactCoordinate::new(&self.group, artifact_id),
                configuration: None,
                constraint: self.catalog.lookup(version_key)?.clone(),
            }),
            ResolutionMode::External => self.resolve_reference(artifact_id, None),
        }
    }
}
