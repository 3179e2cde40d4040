//! Core data types for keel.
//!
//! This crate defines the declarative values a multi-context dependency
//! resolution needs: artifact coordinates, version constraints, exclusion
//! rules, major-version axes, the version catalog, the axis compatibility
//! table, and the once-evaluated build settings.
//!
//! Everything here is constructed during build-configuration evaluation and
//! is immutable afterwards. The crate is free of async code and network I/O.

/// Group under which the project's own modules are published.
pub const DEFAULT_PUBLISHED_GROUP: &str = "org.projectnessie";

pub mod axis;
pub mod compat;
pub mod config;
pub mod coordinate;
pub mod dependency;
pub mod family;
pub mod properties;
pub mod version_catalog;
