//! The lexical extraction pass.

use std::ops::Range;

use tailmark_core::{CandidateToken, IncludedSpan, Span, StyleNode, ValidatorContext};
use tracing::debug;

use crate::error::PatternError;
use crate::include::{InclusionPatterns, rewrite_directives};
use crate::lookup::CandidateLookup;
use crate::position::Utf16Cursor;
use crate::resolve::resolve_positions;

const EXTRACT_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::extract");

/// A confirmed token together with the rule generated for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    span: Span,
    text: String,
    rule: StyleNode,
}

impl Extraction {
    /// Creates an extraction record.
    #[must_use]
    pub fn new(span: Span, text: impl Into<String>, rule: StyleNode) -> Self {
        Self {
            span,
            text: text.into(),
            rule,
        }
    }

    /// Returns the UTF-16 range of the token in the original text.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the token text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the rule the design system generated for the token.
    #[must_use]
    pub const fn rule(&self) -> &StyleNode {
        &self.rule
    }
}

/// Finds confirmed class tokens inside the included regions of a text.
#[derive(Debug, Clone)]
pub struct Extractor {
    patterns: InclusionPatterns,
}

impl Extractor {
    /// Builds an extractor with the built-in inclusion patterns followed by
    /// `extra_patterns`.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] when an extra pattern does not compile.
    pub fn new<S: AsRef<str>>(extra_patterns: &[S]) -> Result<Self, PatternError> {
        Ok(Self {
            patterns: InclusionPatterns::with_extra(extra_patterns)?,
        })
    }

    /// Returns the compiled inclusion patterns.
    #[must_use]
    pub const fn patterns(&self) -> &InclusionPatterns {
        &self.patterns
    }

    /// Returns every included span of `text`, pattern by pattern.
    #[must_use]
    pub fn included_spans(&self, text: &str) -> Vec<IncludedSpan> {
        let mut ranges = self.patterns.byte_ranges(text);
        // The cursor converts ascending offsets in one pass.
        ranges.sort_by_key(|range| range.start);
        let mut cursor = Utf16Cursor::new(text);
        ranges
            .into_iter()
            .filter_map(|range| {
                let matched = text.get(range.clone())?;
                Some(IncludedSpan::new(cursor.span(&range), matched))
            })
            .collect()
    }

    /// Runs extraction against one loaded design system.
    ///
    /// Returned extractions are non-overlapping, ordered by start offset, and
    /// each lies inside at least one included span.
    #[must_use]
    pub fn extract(&self, text: &str, context: &ValidatorContext) -> Vec<Extraction> {
        if text.is_empty() {
            return Vec::new();
        }

        let included = self.patterns.byte_ranges(text);
        let rewritten = rewrite_directives(text);
        let tokens = CandidateToken::sequence(context.tokenizer().tokenize(&rewritten));
        let lookup = CandidateLookup::resolve(context.validator(), &tokens);

        let mut cursor = Utf16Cursor::new(text);
        let mut extractions = Vec::new();
        for resolved in resolve_positions(text, &tokens) {
            let Some(rule) = lookup.validate(resolved.token.text()) else {
                continue;
            };
            if !is_included(&included, &resolved.range) {
                debug!(
                    target: EXTRACT_TARGET,
                    token = resolved.token.text(),
                    "valid token outside every included region; dropped"
                );
                continue;
            }
            extractions.push(Extraction::new(
                cursor.span(&resolved.range),
                resolved.token.text(),
                rule.clone(),
            ));
        }

        debug!(
            target: EXTRACT_TARGET,
            tokens = tokens.len(),
            valid = lookup.len(),
            confirmed = extractions.len(),
            "extraction finished"
        );
        extractions
    }
}

fn is_included(included: &[Range<usize>], candidate: &Range<usize>) -> bool {
    included
        .iter()
        .any(|range| range.start <= candidate.start && candidate.end <= range.end)
}
