use keel_core::coordinate::ArtifactCoordinate;
use keel_core::dependency::{DependencySpec, ExclusionRule, VersionConstraint};

#[test]
fn coordinate_parse_two_and_three_parts() {
    let coord = ArtifactCoordinate::parse("org.projectnessie:nessie-client").unwrap();
    assert_eq!(coord.group, "org.projectnessie");
    assert_eq!(coord.artifact, "nessie-client");
    assert!(coord.classifier.is_none());

    let coord = ArtifactCoordinate::parse("org.projectnessie:nessie-quarkus:runner").unwrap();
    assert_eq!(coord.classifier.as_deref(), Some("runner"));
    assert_eq!(coord.to_string(), "org.projectnessie:nessie-quarkus:runner");
    assert_eq!(coord.module_key(), "org.projectnessie:nessie-quarkus");
}

#[test]
fn coordinate_parse_rejects_bad_shapes() {
    assert!(ArtifactCoordinate::parse("").is_none());
    assert!(ArtifactCoordinate::parse("group").is_none());
    assert!(ArtifactCoordinate::parse("group::x").is_none());
    assert!(ArtifactCoordinate::parse("a:b:c:d").is_none());
}

#[test]
fn constraint_version_and_display() {
    let strict = VersionConstraint::Strict("3.2.1".to_string());
    let preferred = VersionConstraint::Preferred("3.2.1".to_string());
    assert_eq!(strict.version(), preferred.version());
    assert!(strict.is_strict());
    assert!(!preferred.is_strict());
    assert_eq!(strict.to_string(), "3.2.1!!");
    assert_eq!(preferred.to_string(), "3.2.1");
}

#[test]
fn exclusions_have_set_semantics() {
    let rule = ExclusionRule::new("log4j", "log4j");
    let dep = DependencySpec::new(ArtifactCoordinate::new("org.apache.spark", "spark-sql_2.13"))
        .exclude(rule.clone())
        .exclude(rule.clone());
    assert_eq!(dep.exclusions.len(), 1);
    assert!(dep.excludes(&ArtifactCoordinate::new("log4j", "log4j")));
    assert!(!dep.excludes(&ArtifactCoordinate::new("log4j", "log4j-core")));
}

#[test]
fn dependency_serializes_constraint_kind() {
    let dep = DependencySpec::new(ArtifactCoordinate::new("org.scala-lang", "scala-library"))
        .with_constraint(VersionConstraint::Strict("2.13.8".to_string()));
    let json = serde_json::to_value(&dep).unwrap();
    assert_eq!(json["constraint"]["kind"], "strict");
    assert_eq!(json["constraint"]["version"], "2.13.8");
    assert_eq!(json["coordinate"]["artifact"], "scala-library");
    assert!(json["coordinate"].get("classifier").is_none());
    assert_eq!(dep.to_string(), "org.scala-lang:scala-library @ 2.13.8!!");
}
