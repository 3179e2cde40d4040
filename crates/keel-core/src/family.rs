//! Dependency families and the typed keys used to look them up.

use std::fmt;

use crate::axis::AxisVersion;

/// A dependency family versioned along two axes: a framework (primary) and
/// the language runtime it is built against (secondary).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyFamily {
    /// Catalog library prefix for the framework artifact, e.g. `spark-sql`.
    pub primary_library: String,
    /// Catalog library prefix for the runtime artifact, e.g. `scala-library`.
    pub secondary_library: String,
    /// Primary axis value used when a module identifier does not carry one.
    pub fallback_primary: AxisVersion,
    /// Group of the runtime libraries pinned alongside the framework.
    pub runtime_group: String,
    pub runtime_artifacts: Vec<String>,
}

impl DependencyFamily {
    /// Spark SQL on Scala, defaulting to Spark 3.2.
    pub fn spark_scala() -> Self {
        Self {
            primary_library: "spark-sql".to_string(),
            secondary_library: "scala-library".to_string(),
            fallback_primary: AxisVersion::verbatim("3.2"),
            runtime_group: "org.scala-lang".to_string(),
            runtime_artifacts: vec!["scala-library".to_string(), "scala-reflect".to_string()],
        }
    }

    pub fn primary_key(&self, primary: &AxisVersion, secondary: &AxisVersion) -> CatalogKey {
        CatalogKey::Framework {
            library: self.primary_library.clone(),
            primary: primary.clone(),
            secondary: secondary.clone(),
        }
    }

    pub fn secondary_key(&self, secondary: &AxisVersion) -> CatalogKey {
        CatalogKey::Runtime {
            library: self.secondary_library.clone(),
            secondary: secondary.clone(),
        }
    }
}

/// Typed address of a catalog library.
///
/// The catalog file itself is keyed by flat names; [`CatalogKey::lookup_name`]
/// is the only place such names are synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CatalogKey {
    /// `<library>-v<primary>-v<secondary>`, e.g. `spark-sql-v32-v213`.
    Framework {
        library: String,
        primary: AxisVersion,
        secondary: AxisVersion,
    },
    /// `<library>-v<secondary>`, e.g. `scala-library-v213`.
    Runtime {
        library: String,
        secondary: AxisVersion,
    },
    /// A library addressed by its literal catalog name.
    Named(String),
}

impl CatalogKey {
    pub fn lookup_name(&self) -> String {
        match self {
            Self::Framework {
                library,
                primary,
                secondary,
            } => format!("{library}-v{}-v{}", primary.compact(), secondary.compact()),
            Self::Runtime { library, secondary } => format!("{library}-v{}", secondary.compact()),
            Self::Named(name) => name.clone(),
        }
    }
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lookup_name())
    }
}
