//! Catalog-backed resolution of a dependency family's axis pair.

use keel_core::axis::{AxisPair, AxisVersion};
use keel_core::compat::CompatibilityTable;
use keel_core::coordinate::ArtifactCoordinate;
use keel_core::dependency::{DependencySpec, VersionConstraint};
use keel_core::family::DependencyFamily;
use keel_core::version_catalog::VersionCatalog;
use keel_util::errors::KeelError;

use crate::exclusion::ExclusionSet;
use crate::identifier::{parse_identifier, ParsePolicy, ParsedIdentifier};

/// Concrete versions for one (primary, secondary) axis pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedVersions {
    pub primary_major: AxisVersion,
    pub secondary_major: AxisVersion,
    /// Catalog version of the framework artifact, e.g. `3.2.1`.
    pub primary_version: String,
    /// Catalog version of the runtime library, e.g. `2.13.8`.
    pub secondary_version: String,
    pub primary_coordinate: ArtifactCoordinate,
}

impl ResolvedVersions {
    /// Build outputs are kept apart per runtime major.
    pub fn build_subdirectory(&self) -> &str {
        self.secondary_major.as_str()
    }

    /// The framework artifact pinned to its resolved version, with the
    /// framework exclusions attached.
    pub fn framework_dependency(&self) -> DependencySpec {
        ExclusionSet::for_framework(
            DependencySpec::new(self.primary_coordinate.clone()),
            &self.primary_version,
        )
    }

    /// The runtime libraries strictly pinned to the resolved secondary version.
    pub fn runtime_dependencies(&self, family: &DependencyFamily) -> Vec<DependencySpec> {
        family
            .runtime_artifacts
            .iter()
            .map(|artifact| {
                DependencySpec::new(ArtifactCoordinate::new(&family.runtime_group, artifact))
                    .with_constraint(VersionConstraint::Strict(self.secondary_version.clone()))
            })
            .collect()
    }
}

pub struct ConstraintResolver<'a> {
    catalog: &'a VersionCatalog,
    compat: &'a CompatibilityTable,
    family: &'a DependencyFamily,
}

impl<'a> ConstraintResolver<'a> {
    pub fn new(
        catalog: &'a VersionCatalog,
        compat: &'a CompatibilityTable,
        family: &'a DependencyFamily,
    ) -> Self {
        Self {
            catalog,
            compat,
            family,
        }
    }

    /// Resolve both axes. A missing secondary defaults to the first entry of
    /// the primary's compatibility list; an explicit one is used as given.
    pub fn resolve(&self, axis: &AxisPair) -> Result<ResolvedVersions, KeelError> {
        let secondary = match axis.secondary {
            Some(ref explicit) => explicit.clone(),
            None => self.compat.default_secondary(&axis.primary)?.clone(),
        };
        self.compat.check_lookup_fragments(&axis.primary, &secondary)?;

        let primary_entry = self
            .catalog
            .lookup_key(&self.family.primary_key(&axis.primary, &secondary))?;
        let secondary_entry = self
            .catalog
            .lookup_key(&self.family.secondary_key(&secondary))?;

        tracing::debug!(
            primary = %axis.primary,
            %secondary,
            primary_version = primary_entry.constraint.version(),
            secondary_version = secondary_entry.constraint.version(),
            "resolved axis pair"
        );

        Ok(ResolvedVersions {
            primary_major: axis.primary.clone(),
            secondary_major: secondary,
            primary_version: primary_entry.constraint.version().to_string(),
            secondary_version: secondary_entry.constraint.version().to_string(),
            primary_coordinate: primary_entry.coordinate.clone(),
        })
    }

    /// Parse the axis pair out of a module identifier, then [`resolve`](Self::resolve).
    pub fn resolve_identifier(
        &self,
        identifier: &str,
        policy: ParsePolicy,
    ) -> Result<(ParsedIdentifier, ResolvedVersions), KeelError> {
        let parsed = parse_identifier(identifier, &self.family.fallback_primary, policy)?;
        let resolved = self.resolve(&parsed.axis_pair())?;
        Ok((parsed, resolved))
    }
}
