//! Match result type returned to hosts.
//!
//! A [`MatchResult`] is the unit a host receives: the range of a confirmed
//! token and, for hover requests, the generated rule rendered as text.

use serde::{Deserialize, Serialize};

use crate::span::Span;

/// A confirmed class token.
///
/// # Example
///
/// ```
/// use tailmark_core::{MatchResult, Span};
///
/// let plain = MatchResult::new(Span::new(7, 11), None);
/// assert!(plain.style_text().is_none());
///
/// let hovered = plain.with_style_text(".flex {\n  display: flex;\n}");
/// assert!(hovered.style_text().is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The token range in the original text.
    pub span: Span,
    /// The generated rule rendered as style-sheet text, for hover output.
    pub style_text: Option<String>,
}

impl MatchResult {
    /// Creates a match result.
    #[must_use]
    pub const fn new(span: Span, style_text: Option<String>) -> Self {
        Self { span, style_text }
    }

    /// Returns the same match carrying rendered style text.
    #[must_use]
    pub fn with_style_text(self, style_text: impl Into<String>) -> Self {
        Self {
            style_text: Some(style_text.into()),
            ..self
        }
    }

    /// Returns the token range.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the rendered rule, if any.
    #[must_use]
    pub fn style_text(&self) -> Option<&str> {
        self.style_text.as_deref()
    }
}
