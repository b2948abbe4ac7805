//! Error types for the extraction pipeline.
//!
//! Only [`ReloadError`] ever reaches a host: decoration and hover recover
//! from every other failure locally and return smaller results instead.

use thiserror::Error;

use tailmark_core::CatalogError;

/// Errors surfaced by [`Pipeline::reload`](crate::Pipeline::reload).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ReloadError {
    /// The design system could not be located or parsed. The pipeline keeps
    /// its previous context and cache.
    #[error("design system configuration unavailable: {0}")]
    ConfigurationUnavailable(#[from] CatalogError),
}

/// Errors from rendering a style tree to text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RenderError {
    /// A rule has a blank selector.
    #[error("rule has an empty selector")]
    EmptySelector,

    /// An at-rule has a blank name.
    #[error("at-rule has an empty name")]
    EmptyAtRuleName,

    /// A declaration has a blank property.
    #[error("declaration has an empty property")]
    EmptyProperty,

    /// The tree nests deeper than the renderer accepts.
    #[error("style tree nests deeper than {limit} levels")]
    TooDeep {
        /// The maximum supported depth.
        limit: usize,
    },
}

/// An inclusion pattern failed to compile.
#[derive(Debug, Clone, Error)]
#[error("invalid inclusion pattern `{pattern}`: {message}")]
pub struct PatternError {
    /// The pattern source.
    pub pattern: String,
    /// The compiler's description of the failure.
    pub message: String,
}

impl PatternError {
    /// Creates a pattern error.
    #[must_use]
    pub fn new(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

/// Content fingerprinting is not available.
///
/// The pipeline treats this as "compute without caching" for the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("content fingerprint unavailable: {reason}")]
pub struct HashUnavailable {
    /// Why the fingerprint could not be computed.
    pub reason: String,
}

impl HashUnavailable {
    /// Creates a hash failure.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}
