//! Maven-compatible version ordering, used to pick among preferred versions.
//!
//! - Segments are split on `.` and `-`
//! - Numeric segments compare as numbers
//! - Qualifiers order `alpha` < `beta` < `milestone` < `rc` < `snapshot` <
//!   release < `sp`; unknown text sorts below a release
//! - Trailing zero segments are insignificant (`1.0` == `1.0.0`)

use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone)]
pub struct MavenVersion {
    original: String,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Numeric(u64),
    Qualifier(Qualifier),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Qualifier {
    Alpha,
    Beta,
    Milestone,
    Rc,
    Snapshot,
    Release,
    Sp,
}

impl MavenVersion {
    pub fn parse(version: &str) -> Self {
        let segments = version
            .split(['.', '-'])
            .filter(|token| !token.is_empty())
            .map(classify)
            .collect();
        Self {
            original: version.to_string(),
            segments,
        }
    }

    pub fn is_snapshot(&self) -> bool {
        self.original.ends_with("-SNAPSHOT")
    }
}

impl fmt::Display for MavenVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl PartialEq for MavenVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for MavenVersion {}

impl PartialOrd for MavenVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MavenVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| match (self.segments.get(i), other.segments.get(i)) {
                (Some(a), Some(b)) => compare(a, b),
                (Some(a), None) => against_missing(a),
                (None, Some(b)) => against_missing(b).reverse(),
                (None, None) => Ordering::Equal,
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

/// A segment compared with the implicit release padding of a shorter version.
fn against_missing(seg: &Segment) -> Ordering {
    match seg {
        Segment::Numeric(0) => Ordering::Equal,
        Segment::Numeric(_) => Ordering::Greater,
        Segment::Qualifier(q) => q.cmp(&Qualifier::Release),
        Segment::Text(_) => Ordering::Less,
    }
}

fn compare(a: &Segment, b: &Segment) -> Ordering {
    match (a, b) {
        (Segment::Numeric(a), Segment::Numeric(b)) => a.cmp(b),
        (Segment::Qualifier(a), Segment::Qualifier(b)) => a.cmp(b),
        (Segment::Numeric(_), _) => Ordering::Greater,
        (_, Segment::Numeric(_)) => Ordering::Less,
        (Segment::Text(a), Segment::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
        (Segment::Qualifier(q), Segment::Text(_)) => {
            if *q >= Qualifier::Release {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (Segment::Text(_), Segment::Qualifier(q)) => {
            if *q >= Qualifier::Release {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
    }
}

fn classify(token: &str) -> Segment {
    if let Ok(n) = token.parse::<u64>() {
        return Segment::Numeric(n);
    }
    match token.to_lowercase().as_str() {
        "alpha" | "a" => Segment::Qualifier(Qualifier::Alpha),
        "beta" | "b" => Segment::Qualifier(Qualifier::Beta),
        "milestone" | "m" => Segment::Qualifier(Qualifier::Milestone),
        "rc" | "cr" => Segment::Qualifier(Qualifier::Rc),
        "snapshot" => Segment::Qualifier(Qualifier::Snapshot),
        "ga" | "final" | "release" => Segment::Qualifier(Qualifier::Release),
        "sp" => Segment::Qualifier(Qualifier::Sp),
        _ => Segment::Text(token.to_string()),
    }
}
