//! Compatibility table: primary axis value to its ordered secondary values.
//!
//! The first secondary of each row is the default used when a caller names
//! only the primary axis.

use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use keel_util::errors::{KeelError, KeelResult};

use crate::axis::AxisVersion;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatibilityTable {
    rows: BTreeMap<AxisVersion, Vec<AxisVersion>>,
}

#[derive(Deserialize)]
struct CompatibilityFile {
    #[serde(default)]
    compatibility: BTreeMap<String, Vec<String>>,
}

impl CompatibilityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row. Rejects empty secondary lists, non-numeric axis values and
    /// values whose lookup name fragment collides with one already present.
    /// A rejected row leaves the table unchanged.
    pub fn insert(&mut self, primary: &str, secondaries: &[&str]) -> Result<(), KeelError> {
        if secondaries.is_empty() {
            return Err(KeelError::Config {
                message: format!("compatibility list for '{primary}' is empty"),
            });
        }
        let primary = parse_axis(primary)?;
        let secondaries = secondaries
            .iter()
            .map(|s| parse_axis(s))
            .collect::<Result<Vec<_>, _>>()?;
        let replaced = self.rows.insert(primary.clone(), secondaries);
        if let Err(e) = self.validate_lookup_names() {
            match replaced {
                Some(previous) => self.rows.insert(primary, previous),
                None => self.rows.remove(&primary),
            };
            return Err(e);
        }
        Ok(())
    }

    /// Parse the `[compatibility]` table of a TOML document.
    pub fn from_toml(content: &str) -> KeelResult<Self> {
        let file: CompatibilityFile = toml::from_str(content).map_err(|e| KeelError::Config {
            message: format!("Failed to parse compatibility table: {e}"),
        })?;
        let mut table = Self::new();
        for (primary, secondaries) in &file.compatibility {
            let secondaries: Vec<&str> = secondaries.iter().map(String::as_str).collect();
            table.insert(primary, &secondaries)?;
        }
        tracing::debug!(rows = table.rows.len(), "loaded compatibility table");
        Ok(table)
    }

    pub fn from_path(path: &Path) -> KeelResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| KeelError::Config {
            message: format!("Failed to read {}: {e}", path.display()),
        })?;
        Self::from_toml(&content)
    }

    /// Build the table from properties shaped `<prefix><primary><suffix> = a, b`,
    /// e.g. `sparkVersion-3.2-scalaVersions = 2.13, 2.12`.
    pub fn from_properties(
        props: &HashMap<String, String>,
        prefix: &str,
        suffix: &str,
    ) -> Result<Self, KeelError> {
        let mut table = Self::new();
        for (key, value) in props {
            let Some(primary) = key
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_suffix(suffix))
            else {
                continue;
            };
            let secondaries: Vec<&str> = value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            table.insert(primary, &secondaries)?;
        }
        tracing::debug!(rows = table.rows.len(), "loaded compatibility table from properties");
        Ok(table)
    }

    /// The ordered, non-empty list of secondaries compatible with `primary`.
    pub fn compatible_secondaries(&self, primary: &AxisVersion) -> Result<&[AxisVersion], KeelError> {
        self.rows
            .get(primary)
            .map(Vec::as_slice)
            .ok_or_else(|| KeelError::not_found("compatibility entry", primary.as_str()))
    }

    pub fn default_secondary(&self, primary: &AxisVersion) -> Result<&AxisVersion, KeelError> {
        // Rows are never empty, see `insert`.
        self.compatible_secondaries(primary)?
            .first()
            .ok_or_else(|| KeelError::not_found("compatibility entry", primary.as_str()))
    }

    pub fn primaries(&self) -> impl Iterator<Item = &AxisVersion> {
        self.rows.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Check that no two distinct supported values share a compacted lookup
    /// fragment (`2.13` and `21.3` would both become `213`).
    pub fn validate_lookup_names(&self) -> Result<(), KeelError> {
        check_distinct(self.rows.keys(), "primary")?;
        check_distinct(self.rows.values().flatten(), "secondary")
    }

    /// Reject an axis pair naming a value that differs from a supported one
    /// but would synthesize the same catalog name (`32` against `3.2`).
    pub fn check_lookup_fragments(
        &self,
        primary: &AxisVersion,
        secondary: &AxisVersion,
    ) -> Result<(), KeelError> {
        check_against(primary, self.rows.keys(), "primary")?;
        check_against(secondary, self.rows.values().flatten(), "secondary")
    }
}

fn check_distinct<'a>(
    values: impl Iterator<Item = &'a AxisVersion>,
    axis: &str,
) -> Result<(), KeelError> {
    let mut seen: HashMap<String, &AxisVersion> = HashMap::new();
    for value in values {
        if let Some(previous) = seen.insert(value.compact(), value) {
            if previous != value {
                return Err(KeelError::Config {
                    message: format!(
                        "{axis} axis values '{previous}' and '{value}' map to the same lookup name fragment '{}'",
                        value.compact()
                    ),
                });
            }
        }
    }
    Ok(())
}

fn check_against<'a>(
    value: &AxisVersion,
    supported: impl Iterator<Item = &'a AxisVersion>,
    axis: &str,
) -> Result<(), KeelError> {
    let fragment = value.compact();
    for known in supported {
        if known != value && known.compact() == fragment {
            return Err(KeelError::Config {
                message: format!(
                    "{axis} axis value '{value}' shares the lookup name fragment '{fragment}' with supported value '{known}'"
                ),
            });
        }
    }
    Ok(())
}

fn parse_axis(s: &str) -> Result<AxisVersion, KeelError> {
    AxisVersion::parse(s).map_err(|e| KeelError::Config {
        message: format!("invalid compatibility table value: {e}"),
    })
}
