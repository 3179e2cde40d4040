//! Multi-context dependency resolution for keel.
//!
//! Given the immutable inputs from `keel-core` (catalog, compatibility table,
//! build settings) this crate turns module identifiers and axis pairs into
//! concrete versions, picks local or published references for cross-module
//! dependencies, attaches exclusion rules, and mediates competing
//! constraints on the same artifact.

pub mod conflict;
pub mod context;
pub mod exclusion;
pub mod identifier;
pub mod mediation;
pub mod resolver;
pub mod version;
