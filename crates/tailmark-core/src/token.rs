//! Candidate tokens emitted by a design-system tokenizer.

use serde::{Deserialize, Serialize};

/// A class-like token that has not yet been confirmed by a validator.
///
/// Tokens carry their ordinal in the tokenizer output but no position: the
/// same text may occur many times, and positions are recovered later by a
/// forward search over the original source.
///
/// # Example
///
/// ```
/// use tailmark_core::CandidateToken;
///
/// let tokens = CandidateToken::sequence(["flex", "flex"]);
/// assert_eq!(tokens[1].ordinal(), 1);
/// assert_eq!(tokens[1].text(), "flex");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateToken {
    /// Token text as produced by the tokenizer.
    pub text: String,
    /// Zero-based position in the tokenizer output.
    pub ordinal: usize,
}

impl CandidateToken {
    /// Creates a candidate token.
    #[must_use]
    pub fn new(text: impl Into<String>, ordinal: usize) -> Self {
        Self {
            text: text.into(),
            ordinal,
        }
    }

    /// Numbers a tokenizer output sequence.
    #[must_use]
    pub fn sequence<I, S>(texts: I) -> Vec<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        texts
            .into_iter()
            .enumerate()
            .map(|(ordinal, text)| Self::new(text, ordinal))
            .collect()
    }

    /// Returns the token text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the position of the token in the tokenizer output.
    #[must_use]
    pub const fn ordinal(&self) -> usize {
        self.ordinal
    }
}
