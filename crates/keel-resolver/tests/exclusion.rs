use keel_core::coordinate::ArtifactCoordinate;
use keel_core::dependency::{DependencySpec, ExclusionRule, VersionConstraint};
use keel_resolver::exclusion::ExclusionSet;

fn spark_sql() -> DependencySpec {
    DependencySpec::new(ArtifactCoordinate::new("org.apache.spark", "spark-sql_2.13"))
}

#[test]
fn framework_defaults_cover_logging_and_serialization() {
    let set = ExclusionSet::framework_defaults();
    assert_eq!(set.len(), 7);
    let dep = set.apply(spark_sql());
    for (group, artifact) in [
        ("commons-logging", "commons-logging"),
        ("log4j", "log4j"),
        ("org.slf4j", "slf4j-log4j12"),
        ("org.slf4j", "slf4j-reload4j"),
        ("org.eclipse.jetty", "jetty-util"),
        ("org.apache.avro", "avro"),
        ("org.apache.arrow", "arrow-vector"),
    ] {
        assert!(
            dep.excludes(&ArtifactCoordinate::new(group, artifact)),
            "{group}:{artifact} not excluded"
        );
    }
}

#[test]
fn apply_is_idempotent() {
    let set = ExclusionSet::framework_defaults();
    let once = set.apply(spark_sql());
    let twice = set.apply(once.clone());
    assert_eq!(once, twice);
    assert_eq!(twice.exclusions.len(), 7);
}

#[test]
fn apply_keeps_existing_exclusions_and_constraint() {
    let set = ExclusionSet::new([ExclusionRule::new("log4j", "log4j")]);
    let dep = spark_sql()
        .with_constraint(VersionConstraint::Preferred("3.2.0".to_string()))
        .exclude(ExclusionRule::new("com.google.guava", "guava"));
    let dep = set.apply(dep);
    assert_eq!(dep.exclusions.len(), 2);
    assert_eq!(
        dep.constraint,
        Some(VersionConstraint::Preferred("3.2.0".to_string()))
    );
}

#[test]
fn with_strict_version_pins_exactly() {
    let set = ExclusionSet::framework_defaults();
    let dep = spark_sql().with_constraint(VersionConstraint::Preferred("3.1.0".to_string()));
    let pinned = set.with_strict_version(dep, "3.2.1");
    assert_eq!(
        pinned.constraint,
        Some(VersionConstraint::Strict("3.2.1".to_string()))
    );
    assert_eq!(pinned.exclusions.len(), 7);
}

#[test]
fn for_framework_pins_and_excludes() {
    let dep = spark_sql().exclude(ExclusionRule::new("com.google.guava", "guava"));
    let pinned = ExclusionSet::for_framework(dep, "3.3.0");
    assert_eq!(
        pinned.constraint,
        Some(VersionConstraint::Strict("3.3.0".to_string()))
    );
    assert_eq!(pinned.exclusions.len(), 8);
    assert!(pinned.excludes(&ArtifactCoordinate::new("org.apache.avro", "avro")));
    assert!(pinned.excludes(&ArtifactCoordinate::new("com.google.guava", "guava")));
}

#[test]
fn empty_set_changes_nothing() {
    let set = ExclusionSet::default();
    assert!(set.is_empty());
    assert_eq!(set.apply(spark_sql()), spark_sql());
    assert_eq!(set.rules().count(), 0);
}
