//! Requests that lost during constraint mediation.

use std::fmt;

use keel_core::coordinate::ArtifactCoordinate;
use keel_core::dependency::VersionConstraint;

/// How the selected constraint beat the others for its coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinningRule {
    /// The winner was a strict pin, which no other request may substitute.
    StrictPin,
    /// Only preferred requests existed and the winner had the highest version.
    HighestPreferred,
}

impl WinningRule {
    pub fn of(selected: &VersionConstraint) -> Self {
        if selected.is_strict() {
            Self::StrictPin
        } else {
            Self::HighestPreferred
        }
    }
}

impl fmt::Display for WinningRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StrictPin => "strict pin",
            Self::HighestPreferred => "highest preferred",
        })
    }
}

/// A request whose version differs from the one mediation selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverriddenRequest {
    pub coordinate: ArtifactCoordinate,
    pub requested: VersionConstraint,
    pub selected: VersionConstraint,
    pub rule: WinningRule,
}

impl OverriddenRequest {
    pub fn new(
        coordinate: ArtifactCoordinate,
        requested: VersionConstraint,
        selected: VersionConstraint,
    ) -> Self {
        let rule = WinningRule::of(&selected);
        Self {
            coordinate,
            requested,
            selected,
            rule,
        }
    }
}

impl fmt::Display for OverriddenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} wanted {}, got {} by {}",
            self.coordinate, self.requested, self.selected, self.rule
        )
    }
}

/// Every overridden request of one mediation run, in coordinate order.
#[derive(Debug, Default)]
pub struct ConflictReport {
    overridden: Vec<OverriddenRequest>,
}

impl ConflictReport {
    pub fn record(&mut self, request: OverriddenRequest) {
        tracing::warn!(
            coordinate = %request.coordinate,
            requested = %request.requested,
            selected = %request.selected,
            rule = %request.rule,
            "version request overridden"
        );
        self.overridden.push(request);
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverriddenRequest> {
        self.overridden.iter()
    }

    pub fn for_coordinate<'a>(
        &'a self,
        coordinate: &'a ArtifactCoordinate,
    ) -> impl Iterator<Item = &'a OverriddenRequest> {
        self.overridden
            .iter()
            .filter(move |o| &o.coordinate == coordinate)
    }

    pub fn is_empty(&self) -> bool {
        self.overridden.is_empty()
    }

    pub fn len(&self) -> usize {
        self.overridden.len()
    }
}

/// One line per overridden request; nothing when mediation agreed everywhere.
impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for request in &self.overridden {
            writeln!(f, "{request}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spark_sql() -> ArtifactCoordinate {
        ArtifactCoordinate::new("org.apache.spark", "spark-sql_2.13")
    }

    #[test]
    fn rule_follows_the_selected_constraint() {
        let strict = VersionConstraint::Strict("3.2.1".to_string());
        let preferred = VersionConstraint::Preferred("3.3.0".to_string());
        assert_eq!(WinningRule::of(&strict), WinningRule::StrictPin);
        assert_eq!(WinningRule::of(&preferred), WinningRule::HighestPreferred);
    }

    #[test]
    fn report_lines_name_both_constraints() {
        let mut report = ConflictReport::default();
        assert_eq!(report.to_string(), "");
        report.record(OverriddenRequest::new(
            spark_sql(),
            VersionConstraint::Preferred("3.3.0".to_string()),
            VersionConstraint::Strict("3.2.1".to_string()),
        ));
        assert_eq!(
            report.to_string(),
            "org.apache.spark:spark-sql_2.13 wanted 3.3.0, got 3.2.1!! by strict pin\n"
        );
        assert_eq!(report.for_coordinate(&spark_sql()).count(), 1);
        let other = ArtifactCoordinate::new("org.scala-lang", "scala-library");
        assert_eq!(report.for_coordinate(&other).count(), 0);
    }
}
