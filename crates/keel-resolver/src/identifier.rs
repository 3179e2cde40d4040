//! Axis extraction from compound module identifiers.
//!
//! A module such as `nessie-spark-extensions-3.2_2.13` carries its axis
//! values in the last `-` separated part: `<primary>_<secondary>`. Legacy
//! modules carry only the secondary (`..._2.12` or a bare `2.12`), in which
//! case the family's fallback primary applies.

use keel_core::axis::{AxisPair, AxisVersion};
use keel_util::errors::KeelError;

const AXIS_DELIMITER: char = '_';
const NAME_DELIMITER: char = '-';

/// How forgiving identifier parsing is about the primary segment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParsePolicy {
    /// Any non-digit-led primary segment falls back to the default primary.
    #[default]
    Lenient,
    /// Both segments must be dotted numeric versions; a non-digit-led
    /// primary segment is an error instead of a fallback.
    Strict,
}

/// Which branch produced the primary axis value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryOrigin {
    DigitLed,
    FallbackDefault,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedIdentifier {
    pub primary: AxisVersion,
    pub secondary: AxisVersion,
    pub origin: PrimaryOrigin,
}

impl ParsedIdentifier {
    pub fn axis_pair(&self) -> AxisPair {
        AxisPair::explicit(self.primary.clone(), self.secondary.clone())
    }
}

/// Extract the axis values from `identifier`.
pub fn parse_identifier(
    identifier: &str,
    fallback_primary: &AxisVersion,
    policy: ParsePolicy,
) -> Result<ParsedIdentifier, KeelError> {
    let tail = identifier.rsplit(NAME_DELIMITER).next().unwrap_or_default();
    if tail.is_empty() {
        return Err(KeelError::malformed(identifier, "no axis suffix"));
    }

    let segments: Vec<&str> = tail.split(AXIS_DELIMITER).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(KeelError::malformed(identifier, "empty axis segment"));
    }

    match segments.as_slice() {
        [secondary] => {
            if !AxisVersion::verbatim(*secondary).is_digit_led() {
                return Err(KeelError::malformed(
                    identifier,
                    "no '_' separated axis values",
                ));
            }
            Ok(ParsedIdentifier {
                primary: fallback_primary.clone(),
                secondary: secondary_axis(identifier, secondary, policy)?,
                origin: PrimaryOrigin::FallbackDefault,
            })
        }
        [primary, secondary] => {
            let secondary = secondary_axis(identifier, secondary, policy)?;
            let candidate = AxisVersion::verbatim(*primary);
            if candidate.is_digit_led() {
                let primary = match policy {
                    ParsePolicy::Lenient => candidate,
                    ParsePolicy::Strict => AxisVersion::parse(primary)
                        .map_err(|_| KeelError::malformed(identifier, "primary axis is not a version"))?,
                };
                return Ok(ParsedIdentifier {
                    primary,
                    secondary,
                    origin: PrimaryOrigin::DigitLed,
                });
            }
            match policy {
                ParsePolicy::Lenient => {
                    tracing::warn!(
                        identifier,
                        fallback = %fallback_primary,
                        "primary axis segment '{primary}' is not a version, using fallback"
                    );
                    Ok(ParsedIdentifier {
                        primary: fallback_primary.clone(),
                        secondary,
                        origin: PrimaryOrigin::FallbackDefault,
                    })
                }
                ParsePolicy::Strict => Err(KeelError::malformed(
                    identifier,
                    format!("primary axis segment '{primary}' does not start with a digit"),
                )),
            }
        }
        _ => Err(KeelError::malformed(
            identifier,
            format!("expected at most two '{AXIS_DELIMITER}' separated axis values"),
        )),
    }
}

fn secondary_axis(
    identifier: &str,
    segment: &str,
    policy: ParsePolicy,
) -> Result<AxisVersion, KeelError> {
    match policy {
        ParsePolicy::Lenient => Ok(AxisVersion::verbatim(segment)),
        ParsePolicy::Strict => AxisVersion::parse(segment)
            .map_err(|_| KeelError::malformed(identifier, "secondary axis is not a version")),
    }
}
