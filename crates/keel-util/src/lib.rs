//! Shared utilities for keel.
//!
//! This crate holds the cross-cutting error type used by every other keel
//! crate so that configuration failures surface with the same diagnostics
//! regardless of which component raised them.

pub mod errors;
