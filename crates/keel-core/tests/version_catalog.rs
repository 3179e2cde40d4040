use keel_core::coordinate::ArtifactCoordinate;
use keel_core::dependency::VersionConstraint;
use keel_core::family::{CatalogKey, DependencyFamily};
use keel_core::axis::AxisVersion;
use keel_core::version_catalog::VersionCatalog;
use keel_util::errors::KeelError;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("tests/fixtures")
}

fn fixture_catalog() -> VersionCatalog {
    VersionCatalog::from_path(&fixtures_dir().join("libs.versions.toml")).unwrap()
}

#[test]
fn load_fixture_catalog() {
    let catalog = fixture_catalog();
    assert_eq!(catalog.len(), 10);
    assert!(catalog.contains("spark-sql-v32-v213"));
}

#[test]
fn version_ref_keeps_strictness_of_target() {
    let catalog = fixture_catalog();
    assert_eq!(
        catalog.lookup("spark-sql-v32-v213").unwrap(),
        &VersionConstraint::Strict("3.2.1".to_string())
    );
    assert_eq!(
        catalog.lookup("nessie-client").unwrap(),
        &VersionConstraint::Preferred("0.40.0".to_string())
    );
}

#[test]
fn prefer_table_is_preferred() {
    let catalog = fixture_catalog();
    assert_eq!(
        catalog.lookup("nessie-quarkus").unwrap(),
        &VersionConstraint::Preferred("0.40.0".to_string())
    );
}

#[test]
fn entry_carries_coordinate() {
    let catalog = fixture_catalog();
    let entry = catalog.entry("spark-sql-v33-v212").unwrap();
    assert_eq!(
        entry.coordinate,
        ArtifactCoordinate::new("org.apache.spark", "spark-sql_2.12")
    );
    let dep = entry.to_dependency();
    assert_eq!(dep.constraint, Some(VersionConstraint::Strict("3.3.0".to_string())));
    assert!(dep.exclusions.is_empty());
}

#[test]
fn lookup_is_idempotent() {
    let catalog = fixture_catalog();
    for name in catalog.names() {
        let first = catalog.lookup(name).unwrap().clone();
        let second = catalog.lookup(name).unwrap().clone();
        assert_eq!(first, second, "lookup of {name} changed");
    }
}

#[test]
fn lookup_absent_name_is_not_found() {
    let catalog = fixture_catalog();
    let err = catalog.lookup("spark-sql-v34-v213").unwrap_err();
    match err {
        KeelError::NotFound { kind, key } => {
            assert_eq!(kind, "library");
            assert_eq!(key, "spark-sql-v34-v213");
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn lookup_on_empty_catalog_is_not_found() {
    let catalog = VersionCatalog::default();
    assert!(catalog.is_empty());
    assert!(matches!(
        catalog.lookup(""),
        Err(KeelError::NotFound { .. })
    ));
}

#[test]
fn lookup_by_typed_key() {
    let catalog = fixture_catalog();
    let family = DependencyFamily::spark_scala();
    let key = family.primary_key(
        &AxisVersion::parse("3.2").unwrap(),
        &AxisVersion::parse("2.12").unwrap(),
    );
    assert_eq!(key.lookup_name(), "spark-sql-v32-v212");
    assert_eq!(
        catalog.lookup_key(&key).unwrap().constraint.version(),
        "3.2.1"
    );
    let named = CatalogKey::Named("nessie-model".to_string());
    assert_eq!(catalog.lookup_key(&named).unwrap().constraint.version(), "0.40.0");
}

#[test]
fn dangling_version_ref_fails_at_load() {
    let toml = r#"
        [libraries]
        lib = { group = "com.example", artifact = "lib", version.ref = "missing" }
    "#;
    let report = VersionCatalog::from_str(toml).unwrap_err();
    assert!(matches!(
        report.downcast_ref::<KeelError>(),
        Some(KeelError::Catalog { .. })
    ));
    assert!(report.to_string().contains("undefined version 'missing'"));
}

#[test]
fn library_without_version_fails_at_load() {
    let toml = r#"
        [libraries]
        lib = { group = "com.example", artifact = "lib" }
    "#;
    assert!(VersionCatalog::from_str(toml).is_err());
}

#[test]
fn cyclic_version_refs_fail_at_load() {
    let toml = r#"
        [versions]
        a = { ref = "b" }
        b = { ref = "a" }

        [libraries]
        lib = { group = "com.example", artifact = "lib", version.ref = "a" }
    "#;
    let report = VersionCatalog::from_str(toml).unwrap_err();
    assert!(report.to_string().contains("cyclic"), "got: {report}");
}

#[test]
fn insert_builds_catalog_in_code() {
    let mut catalog = VersionCatalog::default();
    catalog.insert(
        "scala-library-v213",
        ArtifactCoordinate::new("org.scala-lang", "scala-library"),
        VersionConstraint::Strict("2.13.8".to_string()),
    );
    assert_eq!(catalog.lookup("scala-library-v213").unwrap().version(), "2.13.8");
}

#[test]
fn missing_catalog_file_is_catalog_error() {
    let report = VersionCatalog::from_path(&fixtures_dir().join("nope.toml")).unwrap_err();
    assert!(report.to_string().contains("Failed to read"));
}
