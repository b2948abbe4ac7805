//! Core data model and collaborator seams for Tailmark.
//!
//! This crate holds the types shared by the extraction pipeline
//! (`tailmark-scan`) and the design-system engines that validate candidates
//! (`tailmark-catalog`): source spans, candidate tokens, generated style
//! trees, match results, and the traits through which a design system plugs
//! its tokenizer and validator into the pipeline.
//!
//! # Core types
//!
//! - [`Span`] and [`IncludedSpan`]: UTF-16 ranges in the original text
//! - [`CandidateToken`]: a class-like token produced by a tokenizer
//! - [`StyleNode`]: a generated rule tree (rule, at-rule, declaration)
//! - [`MatchResult`]: a confirmed token range with optional rendered rule
//! - [`ValidatorContext`]: the tokenizer and validator of one loaded
//!   design system
//! - [`CatalogError`]: failures while loading a design system
//!
//! # Example
//!
//! ```
//! use tailmark_core::{Span, StyleNode};
//!
//! let span = Span::new(7, 11);
//! assert_eq!(span.len(), 4);
//!
//! let rule = StyleNode::rule(".flex", vec![StyleNode::declaration("display", "flex")]);
//! assert_eq!(rule.children().len(), 1);
//! ```

mod design;
mod error;
mod match_result;
mod span;
mod style;
mod token;

pub use design::{
    BatchValidator, ContextLoader, DesignSystemVersion, RuleGenerator, RuleMeta, SourceConfig,
    Tokenizer, ValidatorAdapter, ValidatorContext,
};
pub use error::CatalogError;
pub use match_result::MatchResult;
pub use span::{IncludedSpan, Span};
pub use style::StyleNode;
pub use token::CandidateToken;

#[cfg(test)]
mod tests;
