//! Candidate tokenizer shared by both engine versions.

use tailmark_core::Tokenizer;

use crate::catalog::DEFAULT_SEPARATOR;

const EXTRA_TOKEN_CHARS: &[char] = &['-', '_', '/', '.', '%', '#', '!', '@', '&', '*', '+', '~', '(', ')'];
const LEADING_TRIM: &[char] = &['.', ',', ':', '(', ')'];
const TRAILING_TRIM: &[char] = &['.', ',', ':', '('];

/// Splits text into class-like candidates.
///
/// Outside square brackets a candidate is a run of ASCII letters, digits,
/// the variant separator and `-_/.%#!@&*+~()`. Inside brackets any
/// non-whitespace character except `"` and `` ` `` continues the run, so
/// arbitrary values such as `w-[calc(100%-1rem)]` stay whole. Punctuation
/// that usually surrounds a class in prose or code is trimmed from the ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultTokenizer {
    separator: char,
}

impl Default for DefaultTokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR)
    }
}

impl DefaultTokenizer {
    /// Creates a tokenizer that keeps `separator` inside candidates.
    #[must_use]
    pub const fn new(separator: char) -> Self {
        Self { separator }
    }

    fn continues(&self, ch: char, depth: usize) -> bool {
        if depth > 0 {
            !ch.is_whitespace() && !matches!(ch, '"' | '`')
        } else {
            ch.is_ascii_alphanumeric()
                || ch == self.separator
                || ch == '['
                || EXTRA_TOKEN_CHARS.contains(&ch)
        }
    }
}

impl Tokenizer for DefaultTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        let mut current = String::new();
        let mut depth = 0_usize;

        for ch in text.chars() {
            if self.continues(ch, depth) {
                match ch {
                    '[' => depth += 1,
                    ']' => depth = depth.saturating_sub(1),
                    _ => {}
                }
                current.push(ch);
            } else {
                push_trimmed(&mut tokens, &current);
                current.clear();
                depth = 0;
            }
        }
        push_trimmed(&mut tokens, &current);
        tokens
    }
}

fn push_trimmed(tokens: &mut Vec<String>, raw: &str) {
    let mut trimmed = raw
        .trim_start_matches(LEADING_TRIM)
        .trim_end_matches(TRAILING_TRIM);
    if trimmed.matches(')').count() > trimmed.matches('(').count() {
        trimmed = trimmed.trim_end_matches(')').trim_end_matches(TRAILING_TRIM);
    }
    if !trimmed.is_empty() {
        tokens.push(trimmed.to_owned());
    }
}
