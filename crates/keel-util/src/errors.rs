use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all keel operations.
///
/// Every variant is a configuration error: resolution runs once per build
/// invocation and nothing here is retried.
#[derive(Debug, Error, Diagnostic)]
pub enum KeelError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The version catalog file could not be read or is inconsistent.
    #[error("Version catalog error: {message}")]
    #[diagnostic(help("Check the [versions] and [libraries] tables of the catalog file"))]
    Catalog { message: String },

    /// A lookup key has no entry (catalog library, compatibility row, ...).
    #[error("No {kind} '{key}' defined")]
    #[diagnostic(help("Add the missing entry or fix the requested axis versions"))]
    NotFound { kind: String, key: String },

    /// A compound module identifier does not follow the `<primary>_<secondary>` grammar.
    #[error("Malformed identifier '{identifier}': {reason}")]
    #[diagnostic(help("Expected a module name ending in e.g. '-3.2_2.13'"))]
    MalformedIdentifier { identifier: String, reason: String },

    /// Build settings or the compatibility table are invalid.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Two strict constraints disagree on the version of the same artifact.
    #[error("Version conflict: {message}")]
    #[diagnostic(help("Strict versions cannot be substituted; align the pins"))]
    Conflict { message: String },
}

impl KeelError {
    /// Shorthand for a [`KeelError::NotFound`].
    pub fn not_found(kind: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            kind: kind.into(),
            key: key.into(),
        }
    }

    pub fn malformed(identifier: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedIdentifier {
            identifier: identifier.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias for `miette::Result<T>`.
pub type KeelResult<T> = miette::Result<T>;
