//! Error types for model configuration and confirm-field matching

use thiserror::Error;

/// Configuration-time errors raised while building a classifier
#[derive(Debug, Error)]
pub enum ModelError {
    /// A caller-supplied pattern failed to compile
    #[error("invalid pattern `{name}`: {source}")]
    InvalidPattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },
    /// A coefficient names a feature that is not in the registry
    #[error("coefficient `{0}` does not name a registered feature")]
    UnknownFeature(String),
}

/// Runtime errors raised by the confirm-field matcher.
///
/// Soft misses (no scope, no candidate within the distance budget, candidate
/// already filled) are reported through `FillOutcome`, not through this enum.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    /// The source field is not present in its own scope's field list.
    /// This is caller misuse, never a soft miss.
    #[error("source field is not present in its scope's field list")]
    FieldNotInScope,
}
