//! Recovers the position of each candidate token in the original text.
//!
//! Tokenizers report text, not positions, and the same text may occur many
//! times. Each token is therefore searched for from the end of the previous
//! found token, which pairs the n-th occurrence in the tokenizer output with
//! the n-th occurrence in the source.

use std::ops::Range;

use tailmark_core::CandidateToken;
use tracing::debug;

const RESOLVE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::resolve");

/// A candidate token paired with its byte range in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedToken<'t> {
    pub(crate) token: &'t CandidateToken,
    pub(crate) range: Range<usize>,
}

/// Resolves token positions with a forward-only cursor.
///
/// A token that cannot be found from the cursor onwards is dropped and the
/// cursor stays where it was. Every found token moves the cursor to its end,
/// whether or not it later turns out to be valid.
pub(crate) fn resolve_positions<'t>(
    text: &str,
    tokens: &'t [CandidateToken],
) -> Vec<ResolvedToken<'t>> {
    let mut cursor = 0;
    let mut resolved = Vec::with_capacity(tokens.len());

    for token in tokens {
        let needle = token.text();
        if needle.is_empty() {
            continue;
        }
        let Some(offset) = text.get(cursor..).and_then(|rest| rest.find(needle)) else {
            debug!(
                target: RESOLVE_TARGET,
                token = needle,
                ordinal = token.ordinal(),
                cursor,
                "token not found in source; dropped"
            );
            continue;
        };
        let start = cursor + offset;
        let end = start + needle.len();
        cursor = end;
        resolved.push(ResolvedToken {
            token,
            range: start..end,
        });
    }
    resolved
}
