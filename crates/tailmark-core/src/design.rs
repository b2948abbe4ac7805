//! Seams through which a design system plugs into the pipeline.
//!
//! A loaded design system supplies two things: a [`Tokenizer`] that turns
//! raw text into candidate tokens, and a validator that confirms candidates
//! by generating style rules for them. Validators come in two shapes that
//! mirror two incompatible major versions of the underlying engine:
//!
//! - [`BatchValidator`] answers one slot per input candidate, `None` marking
//!   an invalid one (v4 engines).
//! - [`RuleGenerator`] returns an unordered list of generated rules for the
//!   valid candidates only, each tagged with the candidate that produced it
//!   (v3 engines).
//!
//! Both are wrapped in the closed [`ValidatorAdapter`] enum so the pipeline
//! never branches on engine version anywhere else.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::style::StyleNode;

/// Splits source text into class-like candidate tokens.
pub trait Tokenizer {
    /// Returns candidate tokens in order of appearance. Tokens may repeat.
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Validator shape that answers every candidate slot in order.
pub trait BatchValidator {
    /// Returns one entry per candidate, in input order; `None` marks an
    /// invalid candidate.
    fn candidates_to_css(&self, candidates: &[String]) -> Vec<Option<StyleNode>>;
}

/// Validator shape that lists generated rules for valid candidates only.
pub trait RuleGenerator {
    /// Returns generated rules in no particular order. Invalid candidates
    /// are simply absent.
    fn generate_rules(&self, candidates: &[String]) -> Vec<(RuleMeta, StyleNode)>;
}

/// Metadata attached to a generated rule by a [`RuleGenerator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleMeta {
    /// The candidate text that produced the rule.
    pub candidate: String,
}

impl RuleMeta {
    /// Creates rule metadata for `candidate`.
    #[must_use]
    pub fn new(candidate: impl Into<String>) -> Self {
        Self {
            candidate: candidate.into(),
        }
    }

    /// Returns the originating candidate.
    #[must_use]
    pub fn candidate(&self) -> &str {
        &self.candidate
    }
}

/// The validator of a loaded design system, in whichever shape it has.
pub enum ValidatorAdapter {
    /// Slot-per-candidate validator.
    Batch(Box<dyn BatchValidator>),
    /// Pair-list validator.
    PairList(Box<dyn RuleGenerator>),
}

impl ValidatorAdapter {
    /// Returns the design-system major version this shape belongs to.
    #[must_use]
    pub const fn version(&self) -> DesignSystemVersion {
        match self {
            Self::Batch(_) => DesignSystemVersion::V4,
            Self::PairList(_) => DesignSystemVersion::V3,
        }
    }
}

impl fmt::Debug for ValidatorAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Batch(_) => f.write_str("ValidatorAdapter::Batch"),
            Self::PairList(_) => f.write_str("ValidatorAdapter::PairList"),
        }
    }
}

/// Tokenizer and validator of one loaded design system.
///
/// A context is built once per configuration load and never mutated; a
/// reload builds a new one and the old one is dropped.
pub struct ValidatorContext {
    tokenizer: Box<dyn Tokenizer>,
    validator: ValidatorAdapter,
}

impl ValidatorContext {
    /// Bundles a tokenizer with a validator.
    #[must_use]
    pub fn new(tokenizer: Box<dyn Tokenizer>, validator: ValidatorAdapter) -> Self {
        Self {
            tokenizer,
            validator,
        }
    }

    /// Returns the tokenizer.
    #[must_use]
    pub fn tokenizer(&self) -> &dyn Tokenizer {
        self.tokenizer.as_ref()
    }

    /// Returns the validator.
    #[must_use]
    pub const fn validator(&self) -> &ValidatorAdapter {
        &self.validator
    }

    /// Returns the design-system major version of the validator.
    #[must_use]
    pub const fn version(&self) -> DesignSystemVersion {
        self.validator.version()
    }
}

impl fmt::Debug for ValidatorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidatorContext")
            .field("validator", &self.validator)
            .finish_non_exhaustive()
    }
}

/// Supported design-system major versions.
///
/// # Example
///
/// ```
/// use tailmark_core::DesignSystemVersion;
///
/// let version: DesignSystemVersion = "v4".parse()?;
/// assert_eq!(version, DesignSystemVersion::V4);
/// assert_eq!(version.to_string(), "v4");
/// # Ok::<(), tailmark_core::CatalogError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignSystemVersion {
    /// Configuration-file engines with a pair-list validator.
    V3,
    /// Stylesheet engines with a batch validator.
    V4,
}

impl fmt::Display for DesignSystemVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V3 => f.write_str("v3"),
            Self::V4 => f.write_str("v4"),
        }
    }
}

impl FromStr for DesignSystemVersion {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v3" | "3" => Ok(Self::V3),
            "v4" | "4" => Ok(Self::V4),
            other => Err(CatalogError::unsupported_version(other)),
        }
    }
}

/// Where a design system is loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    /// A configuration manifest on disk (v3 engines).
    ConfigFile(PathBuf),
    /// A stylesheet entry file on disk (v4 engines).
    StylesheetFile(PathBuf),
    /// Inline stylesheet source (v4 engines).
    Stylesheet {
        /// The stylesheet text.
        css: String,
    },
}

impl SourceConfig {
    /// Returns the design-system version this source is read by.
    #[must_use]
    pub const fn version(&self) -> DesignSystemVersion {
        match self {
            Self::ConfigFile(_) => DesignSystemVersion::V3,
            Self::StylesheetFile(_) | Self::Stylesheet { .. } => DesignSystemVersion::V4,
        }
    }
}

/// Builds a [`ValidatorContext`] from a [`SourceConfig`].
///
/// Any `Fn(&SourceConfig) -> Result<ValidatorContext, CatalogError>` closure
/// is a loader, which keeps test doubles short.
pub trait ContextLoader {
    /// Loads a design system.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when the source cannot be read or parsed.
    fn load(&self, source: &SourceConfig) -> Result<ValidatorContext, CatalogError>;
}

impl<F> ContextLoader for F
where
    F: Fn(&SourceConfig) -> Result<ValidatorContext, CatalogError>,
{
    fn load(&self, source: &SourceConfig) -> Result<ValidatorContext, CatalogError> {
        self(source)
    }
}
