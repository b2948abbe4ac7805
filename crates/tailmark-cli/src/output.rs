//! Writers for decoration and hover results.

use std::io::Write;

use serde::Serialize;
use tailmark_core::{MatchResult, Span};

use crate::errors::AppError;

/// One decorated class as printed by `tailmark decorate`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct SpanRecord {
    start: u32,
    end: u32,
    text: String,
}

impl SpanRecord {
    #[must_use]
    pub(crate) fn new(source: &str, span: Span) -> Self {
        Self {
            start: span.start(),
            end: span.end(),
            text: utf16_slice(source, span),
        }
    }
}

/// Writes `spans` of `source` as a JSON array followed by a newline.
pub(crate) fn write_spans<W: Write>(
    out: &mut W,
    source: &str,
    spans: &[Span],
) -> Result<(), AppError> {
    let records: Vec<SpanRecord> = spans
        .iter()
        .map(|span| SpanRecord::new(source, *span))
        .collect();
    serde_json::to_writer(&mut *out, &records).map_err(AppError::Serialise)?;
    writeln!(out).map_err(AppError::Write)
}

/// Writes the rendered rule of `hover`, or nothing.
pub(crate) fn write_hover<W: Write>(
    out: &mut W,
    hover: Option<&MatchResult>,
) -> Result<(), AppError> {
    hover
        .and_then(MatchResult::style_text)
        .map_or(Ok(()), |style_text| {
            writeln!(out, "{style_text}").map_err(AppError::Write)
        })
}

/// Returns the text of `source` covered by the UTF-16 `span`.
fn utf16_slice(source: &str, span: Span) -> String {
    let units: Vec<u16> = source
        .encode_utf16()
        .skip(usize::try_from(span.start()).unwrap_or(usize::MAX))
        .take(usize::try_from(span.len()).unwrap_or(usize::MAX))
        .collect();
    String::from_utf16_lossy(&units)
}
