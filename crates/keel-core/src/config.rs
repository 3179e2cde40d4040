//! Build settings evaluated once at configuration start.
//!
//! Values come from a `.properties` file, overridden by environment
//! variables. The resulting [`BuildSettings`] is immutable and passed to the
//! resolvers explicitly.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use keel_util::errors::{KeelError, KeelResult};

use crate::properties::load_properties;

pub const INTEGRATIONS_TESTING_PROPERTY: &str = "keel.integrationsTesting.enable";
pub const INTEGRATIONS_TESTING_ENV: &str = "KEEL_INTEGRATIONS_TESTING";
pub const UBER_JAR_PROPERTY: &str = "uber-jar";
pub const UBER_JAR_ENV: &str = "KEEL_UBER_JAR";
pub const JAVA_RELEASE_PROPERTY: &str = "keel.java.release";
pub const TEST_LOG_LEVEL_PROPERTY: &str = "test.log.level";
pub const PUBLISHED_GROUP_PROPERTY: &str = "keel.publishedGroup";

const DEFAULT_JAVA_RELEASE: u32 = 11;
const MIN_JAVA_RELEASE: u32 = 8;
const DEFAULT_TEST_LOG_LEVEL: &str = "WARN";

/// Where cross-module references resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionMode {
    /// Modules of the same build, referenced by project path.
    Local,
    /// Published artifacts, referenced by coordinate and catalog version.
    External,
}

impl ResolutionMode {
    /// `External` when integrations testing is enabled.
    pub fn from_flag(integrations_testing: bool) -> Self {
        if integrations_testing {
            Self::External
        } else {
            Self::Local
        }
    }
}

impl fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::External => f.write_str("external"),
        }
    }
}

/// Java source and target compatibility level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JavaCompatibility {
    pub source: u32,
    pub target: u32,
}

impl JavaCompatibility {
    pub fn release(release: u32) -> Self {
        Self {
            source: release,
            target: release,
        }
    }
}

impl Default for JavaCompatibility {
    fn default() -> Self {
        Self::release(DEFAULT_JAVA_RELEASE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSettings {
    pub mode: ResolutionMode,
    pub uber_jar_requested: bool,
    pub java: JavaCompatibility,
    pub test_log_level: String,
    pub published_group: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            mode: ResolutionMode::Local,
            uber_jar_requested: false,
            java: JavaCompatibility::default(),
            test_log_level: DEFAULT_TEST_LOG_LEVEL.to_string(),
            published_group: crate::DEFAULT_PUBLISHED_GROUP.to_string(),
        }
    }
}

impl BuildSettings {
    /// Load from a properties file with process environment overrides.
    pub fn load(properties_file: &Path) -> KeelResult<Self> {
        let props = load_properties(properties_file)?;
        Ok(Self::from_sources(&props, |key| std::env::var(key).ok())?)
    }

    /// Build settings from explicit sources. `env` is consulted before the
    /// properties for keys that have an environment override.
    pub fn from_sources(
        props: &HashMap<String, String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, KeelError> {
        let integrations_testing = env(INTEGRATIONS_TESTING_ENV)
            .or_else(|| props.get(INTEGRATIONS_TESTING_PROPERTY).cloned())
            .is_some_and(|v| parse_bool(&v));
        let uber_jar_requested =
            env(UBER_JAR_ENV).is_some() || props.contains_key(UBER_JAR_PROPERTY);

        let java = match props.get(JAVA_RELEASE_PROPERTY) {
            Some(raw) => JavaCompatibility::release(parse_java_release(raw)?),
            None => JavaCompatibility::default(),
        };

        let settings = Self {
            mode: ResolutionMode::from_flag(integrations_testing),
            uber_jar_requested,
            java,
            test_log_level: props
                .get(TEST_LOG_LEVEL_PROPERTY)
                .cloned()
                .unwrap_or_else(|| DEFAULT_TEST_LOG_LEVEL.to_string()),
            published_group: props
                .get(PUBLISHED_GROUP_PROPERTY)
                .cloned()
                .unwrap_or_else(|| crate::DEFAULT_PUBLISHED_GROUP.to_string()),
        };
        tracing::debug!(mode = %settings.mode, uber_jar = settings.uber_jar(), "build settings");
        Ok(settings)
    }

    pub fn integrations_testing(&self) -> bool {
        self.mode == ResolutionMode::External
    }

    /// Whether application modules are packaged as a single uber-jar.
    pub fn uber_jar(&self) -> bool {
        self.uber_jar_requested || self.integrations_testing()
    }
}

/// Only `true` (any case) is true.
fn parse_bool(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

fn parse_java_release(raw: &str) -> Result<u32, KeelError> {
    let trimmed = raw.trim();
    // `1.8` style releases name Java 8.
    let normalized = trimmed.strip_prefix("1.").unwrap_or(trimmed);
    match normalized.parse::<u32>() {
        Ok(release) if release >= MIN_JAVA_RELEASE => Ok(release),
        _ => Err(KeelError::Config {
            message: format!(
                "invalid Java release '{raw}' for {JAVA_RELEASE_PROPERTY}, expected {MIN_JAVA_RELEASE} or newer"
            ),
        }),
    }
}
