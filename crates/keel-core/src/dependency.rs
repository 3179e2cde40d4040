use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::coordinate::ArtifactCoordinate;

/// A version requirement attached to a dependency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "version")]
pub enum VersionConstraint {
    /// Exact pin; a conflict resolver may not upgrade or downgrade it.
    Strict(String),
    /// Advisory version; a conflict resolver may substitute another.
    Preferred(String),
}

impl VersionConstraint {
    /// The version string regardless of strictness.
    pub fn version(&self) -> &str {
        match self {
            Self::Strict(v) | Self::Preferred(v) => v,
        }
    }

    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Strict(_))
    }
}

impl fmt::Display for VersionConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict(v) => write!(f, "{v}!!"),
            Self::Preferred(v) => f.write_str(v),
        }
    }
}

/// A transitive dependency to strip from a dependency's closure.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExclusionRule {
    pub group: String,
    pub artifact: String,
}

impl ExclusionRule {
    pub fn new(group: impl Into<String>, artifact: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            artifact: artifact.into(),
        }
    }

    pub fn matches(&self, coordinate: &ArtifactCoordinate) -> bool {
        self.group == coordinate.group && self.artifact == coordinate.artifact
    }
}

/// A declarative dependency handed to the build engine.
///
/// Exclusions are kept in a set, so attaching the same rule twice is a no-op.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencySpec {
    pub coordinate: ArtifactCoordinate,
    #[serde(default)]
    pub constraint: Option<VersionConstraint>,
    #[serde(default)]
    pub exclusions: BTreeSet<ExclusionRule>,
}

impl DependencySpec {
    pub fn new(coordinate: ArtifactCoordinate) -> Self {
        Self {
            coordinate,
            constraint: None,
            exclusions: BTreeSet::new(),
        }
    }

    pub fn with_constraint(mut self, constraint: VersionConstraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    pub fn exclude(mut self, rule: ExclusionRule) -> Self {
        self.exclusions.insert(rule);
        self
    }

    pub fn excludes(&self, coordinate: &ArtifactCoordinate) -> bool {
        self.exclusions.iter().any(|r| r.matches(coordinate))
    }
}

impl fmt::Display for DependencySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.coordinate)?;
        if let Some(ref constraint) = self.constraint {
            write!(f, " @ {constraint}")?;
        }
        Ok(())
    }
}
