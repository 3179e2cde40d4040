//! Mediation of several constraints requested for the same artifact.
//!
//! A strict constraint is never substituted: it beats every preferred
//! request, and two strict constraints on different versions cannot be
//! reconciled. Among preferred requests the highest version wins.

use std::collections::BTreeMap;

use keel_core::coordinate::ArtifactCoordinate;
use keel_core::dependency::{DependencySpec, VersionConstraint};
use keel_util::errors::KeelError;

use crate::conflict::{ConflictReport, OverriddenRequest};
use crate::version::MavenVersion;

#[derive(Debug, Default)]
pub struct Mediation {
    /// The winning constraint per artifact.
    pub selected: BTreeMap<ArtifactCoordinate, VersionConstraint>,
    pub conflicts: ConflictReport,
}

/// Pick one constraint per coordinate. Dependencies without a constraint
/// take no part.
pub fn mediate<'a>(
    requests: impl IntoIterator<Item = &'a DependencySpec>,
) -> Result<Mediation, KeelError> {
    let mut grouped: BTreeMap<&ArtifactCoordinate, Vec<&VersionConstraint>> = BTreeMap::new();
    for dep in requests {
        if let Some(ref constraint) = dep.constraint {
            grouped.entry(&dep.coordinate).or_default().push(constraint);
        }
    }

    let mut result = Mediation::default();
    for (coordinate, constraints) in grouped {
        let winner = select(coordinate, &constraints)?;
        for requested in &constraints {
            if requested.version() != winner.version() {
                result.conflicts.record(OverriddenRequest::new(
                    coordinate.clone(),
                    (*requested).clone(),
                    winner.clone(),
                ));
            }
        }
        result.selected.insert(coordinate.clone(), winner.clone());
    }
    Ok(result)
}

fn select<'c>(
    coordinate: &ArtifactCoordinate,
    constraints: &[&'c VersionConstraint],
) -> Result<&'c VersionConstraint, KeelError> {
    let mut strict = constraints.iter().copied().filter(|c| c.is_strict());
    if let Some(first) = strict.next() {
        if let Some(other) = strict.find(|c| c.version() != first.version()) {
            return Err(KeelError::Conflict {
                message: format!(
                    "{coordinate} is strictly pinned to both {} and {}",
                    first.version(),
                    other.version()
                ),
            });
        }
        return Ok(first);
    }

    constraints
        .iter()
        .copied()
        .max_by(|a, b| MavenVersion::parse(a.version()).cmp(&MavenVersion::parse(b.version())))
        .ok_or_else(|| KeelError::not_found("constraint for", coordinate.to_string()))
}
