//! Inclusion patterns and directive rewriting.
//!
//! Candidate tokens only count when they sit inside an *included* region of
//! the source: a quoted string literal or an `@apply …;` statement. Hosts
//! may append their own patterns after the built-in ones.
//!
//! `@apply` statements also get a single space inserted before their
//! terminating semicolon before tokenizing, so that the last class of the
//! statement is never glued to the `;`. The rewritten text is only ever fed
//! to the tokenizer; offsets are always taken from the original.

use std::borrow::Cow;
use std::ops::Range;

use regex::Regex;

use crate::error::PatternError;

/// String literals in double quotes, single quotes, or backticks. The
/// closing quote must match the opening one; literals may span lines.
const STRING_LITERAL: &str = r#""[^"]*"|'[^']*'|`[^`]*`"#;

/// `@apply` statements up to and including their semicolon.
const APPLY_DIRECTIVE: &str = r"@apply[^;]*;";

const DIRECTIVE_KEYWORD: &str = "@apply";

/// Ordered set of compiled inclusion patterns.
#[derive(Debug, Clone)]
pub struct InclusionPatterns {
    patterns: Vec<Regex>,
}

impl InclusionPatterns {
    /// Compiles the built-in patterns.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] only if a built-in pattern is rejected by
    /// the regex engine.
    pub fn builtin() -> Result<Self, PatternError> {
        Self::with_extra::<&str>(&[])
    }

    /// Compiles the built-in patterns followed by `extra` patterns.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] naming the first pattern that fails to
    /// compile.
    pub fn with_extra<S: AsRef<str>>(extra: &[S]) -> Result<Self, PatternError> {
        let sources = [STRING_LITERAL, APPLY_DIRECTIVE]
            .into_iter()
            .chain(extra.iter().map(|pattern| pattern.as_ref()));
        let patterns = sources
            .map(|source| {
                Regex::new(source).map_err(|error| PatternError::new(source, error.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Returns the number of compiled patterns.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Returns `true` when no pattern is compiled.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Returns the byte range of every match of every pattern, pattern by
    /// pattern, each pattern's matches left to right.
    pub(crate) fn byte_ranges(&self, text: &str) -> Vec<Range<usize>> {
        self.patterns
            .iter()
            .flat_map(|pattern| pattern.find_iter(text).map(|found| found.range()))
            .filter(|range| !range.is_empty())
            .collect()
    }
}

/// Inserts a space before the terminating `;` of every `@apply` statement.
///
/// Returns the input unchanged when it holds no complete statement.
pub(crate) fn rewrite_directives(text: &str) -> Cow<'_, str> {
    let mut rewritten = String::new();
    let mut copied = 0;
    let mut search_from = 0;

    while let Some(found) = text
        .get(search_from..)
        .and_then(|rest| rest.find(DIRECTIVE_KEYWORD))
    {
        let keyword_end = search_from + found + DIRECTIVE_KEYWORD.len();
        let Some(semicolon) = text
            .get(keyword_end..)
            .and_then(|rest| rest.find(';'))
            .map(|offset| keyword_end + offset)
        else {
            break;
        };

        rewritten.push_str(text.get(copied..semicolon).unwrap_or_default());
        rewritten.push_str(" ;");
        copied = semicolon + 1;
        search_from = copied;
    }

    if copied == 0 {
        return Cow::Borrowed(text);
    }
    rewritten.push_str(text.get(copied..).unwrap_or_default());
    Cow::Owned(rewritten)
}
