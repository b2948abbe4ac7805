//! Source span types for locating class tokens.

use serde::{Deserialize, Serialize};

/// A half-open range over the UTF-16 code units of a source text.
///
/// Offsets always refer to the original text handed to the pipeline, never
/// to any rewritten copy used for tokenizing. Editors address documents in
/// UTF-16, so that is the unit used here.
///
/// # Example
///
/// ```
/// use tailmark_core::Span;
///
/// let outer = Span::new(6, 21);
/// let inner = Span::new(7, 11);
/// assert!(outer.contains(&inner));
/// assert!(inner.contains_offset(10));
/// assert!(!inner.contains_offset(11));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawSpan")]
pub struct Span {
    start: u32,
    end: u32,
}

/// Wire form of [`Span`]; deserialised bounds pass through [`Span::new`].
#[derive(Deserialize)]
struct RawSpan {
    start: u32,
    end: u32,
}

impl From<RawSpan> for Span {
    fn from(raw: RawSpan) -> Self {
        Self::new(raw.start, raw.end)
    }
}

impl Span {
    /// Creates a new span. `end` is clamped so that `start <= end` holds.
    #[must_use]
    pub const fn new(start: u32, end: u32) -> Self {
        let end = if end < start { start } else { end };
        Self { start, end }
    }

    /// Returns the inclusive start offset.
    #[must_use]
    pub const fn start(&self) -> u32 {
        self.start
    }

    /// Returns the exclusive end offset.
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.end
    }

    /// Returns the number of code units covered.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` when the span covers nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` when `other` lies wholly inside this span.
    #[must_use]
    pub const fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Returns `true` when `offset` falls inside this span.
    #[must_use]
    pub const fn contains_offset(&self, offset: u32) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// A region of the source inside which candidate tokens are accepted.
///
/// Included spans come from the inclusion patterns (quoted string literals,
/// `@apply` statements). A token found outside all of them is ignored even
/// when the design system accepts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncludedSpan {
    /// The covered range.
    pub span: Span,
    /// The substring the span was matched from.
    pub text: String,
}

impl IncludedSpan {
    /// Creates an included span.
    #[must_use]
    pub fn new(span: Span, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }

    /// Returns the covered range.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Returns the matched substring.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}
