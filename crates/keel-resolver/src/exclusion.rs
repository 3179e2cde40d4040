//! Fixed exclusion lists applied to a dependency family.

use std::collections::BTreeSet;

use keel_core::dependency::{DependencySpec, ExclusionRule, VersionConstraint};

/// Logging and serialization libraries the data-processing framework pulls
/// in transitively and which would shadow the build's own choices.
const FRAMEWORK_EXCLUSIONS: &[(&str, &str)] = &[
    ("commons-logging", "commons-logging"),
    ("log4j", "log4j"),
    ("org.slf4j", "slf4j-log4j12"),
    ("org.slf4j", "slf4j-reload4j"),
    ("org.eclipse.jetty", "jetty-util"),
    ("org.apache.avro", "avro"),
    ("org.apache.arrow", "arrow-vector"),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    rules: BTreeSet<ExclusionRule>,
}

impl ExclusionSet {
    pub fn new(rules: impl IntoIterator<Item = ExclusionRule>) -> Self {
        Self {
            rules: rules.into_iter().collect(),
        }
    }

    pub fn framework_defaults() -> Self {
        Self::new(
            FRAMEWORK_EXCLUSIONS
                .iter()
                .map(|(group, artifact)| ExclusionRule::new(*group, *artifact)),
        )
    }

    /// Pin a framework dependency to `version` with the framework exclusions.
    pub fn for_framework(dep: DependencySpec, version: &str) -> DependencySpec {
        Self::framework_defaults().with_strict_version(dep, version)
    }

    /// Attach every rule to `dep`. Idempotent.
    pub fn apply(&self, mut dep: DependencySpec) -> DependencySpec {
        dep.exclusions.extend(self.rules.iter().cloned());
        dep
    }

    /// Pin `dep` to exactly `version`, then [`apply`](Self::apply).
    pub fn with_strict_version(&self, dep: DependencySpec, version: &str) -> DependencySpec {
        self.apply(dep.with_constraint(VersionConstraint::Strict(version.to_string())))
    }

    pub fn rules(&self) -> impl Iterator<Item = &ExclusionRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
