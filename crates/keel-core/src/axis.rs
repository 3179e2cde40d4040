//! Major-version axes of a dependency family.
//!
//! An axis value is a dotted major version such as `3.2` (framework) or
//! `2.13` (language runtime). Catalog lookup names embed the value in a
//! compacted form with the separators stripped (`3.2` becomes `32`).

use serde::{Deserialize, Serialize};
use std::fmt;

use keel_util::errors::KeelError;

/// A single axis value, e.g. `3.2` or `2.13`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AxisVersion(String);

impl AxisVersion {
    /// Parse a dotted numeric version (`digits ('.' digits)*`).
    pub fn parse(s: &str) -> Result<Self, KeelError> {
        let valid = !s.is_empty()
            && s
                .split('.')
                .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()));
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(KeelError::malformed(
                s,
                "expected a dotted numeric major version such as '3.2'",
            ))
        }
    }

    /// Accept a value as-is, without checking the dotted numeric grammar.
    pub fn verbatim(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The value with every non-alphanumeric character removed.
    pub fn compact(&self) -> String {
        self.0.chars().filter(|c| c.is_ascii_alphanumeric()).collect()
    }

    pub fn is_digit_led(&self) -> bool {
        self.0.starts_with(|c: char| c.is_ascii_digit())
    }
}

impl fmt::Display for AxisVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A primary axis value with an optional explicit secondary.
///
/// When `secondary` is `None` the resolver takes the primary's default
/// secondary from the compatibility table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AxisPair {
    pub primary: AxisVersion,
    pub secondary: Option<AxisVersion>,
}

impl AxisPair {
    pub fn primary_only(primary: AxisVersion) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn explicit(primary: AxisVersion, secondary: AxisVersion) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_dotted_numbers() {
        assert_eq!(AxisVersion::parse("3.2").unwrap().as_str(), "3.2");
        assert_eq!(AxisVersion::parse("11").unwrap().as_str(), "11");
    }

    #[test]
    fn parse_rejects_non_numeric() {
        assert!(AxisVersion::parse("").is_err());
        assert!(AxisVersion::parse("3.").is_err());
        assert!(AxisVersion::parse("extensions").is_err());
        assert!(AxisVersion::parse("3.2a").is_err());
    }

    #[test]
    fn compact_strips_separators() {
        assert_eq!(AxisVersion::parse("3.2").unwrap().compact(), "32");
        assert_eq!(AxisVersion::parse("2.13").unwrap().compact(), "213");
        assert_eq!(AxisVersion::verbatim("2_13-x").compact(), "213x");
    }

    #[test]
    fn digit_led_checks_first_character() {
        assert!(AxisVersion::verbatim("3.2").is_digit_led());
        assert!(AxisVersion::verbatim("3x").is_digit_led());
        assert!(!AxisVersion::verbatim("extensions").is_digit_led());
        assert!(!AxisVersion::verbatim("").is_digit_led());
    }
}
