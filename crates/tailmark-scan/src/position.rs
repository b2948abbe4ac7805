//! Byte offset to UTF-16 offset conversion.
//!
//! Rust string search yields byte offsets; hosts address documents in UTF-16
//! code units. Conversions walk the text forward from the last converted
//! offset, so converting an ascending sequence is a single pass.

use std::ops::Range;

use tailmark_core::Span;

/// Incremental byte to UTF-16 converter over one text.
pub(crate) struct Utf16Cursor<'a> {
    text: &'a str,
    byte: usize,
    unit: usize,
}

impl<'a> Utf16Cursor<'a> {
    pub(crate) const fn new(text: &'a str) -> Self {
        Self {
            text,
            byte: 0,
            unit: 0,
        }
    }

    /// Converts a byte offset on a character boundary to UTF-16 units.
    pub(crate) fn to_utf16(&mut self, byte: usize) -> u32 {
        if byte < self.byte {
            self.byte = 0;
            self.unit = 0;
        }
        let walked: usize = self
            .text
            .get(self.byte..byte)
            .map(|slice| slice.chars().map(char::len_utf16).sum())
            .unwrap_or_default();
        self.byte = byte;
        self.unit = self.unit.saturating_add(walked);
        // Offsets will realistically never exceed u32::MAX.
        u32::try_from(self.unit).unwrap_or(u32::MAX)
    }

    /// Converts a byte range to a UTF-16 [`Span`].
    pub(crate) fn span(&mut self, range: &Range<usize>) -> Span {
        let start = self.to_utf16(range.start);
        let end = self.to_utf16(range.end);
        Span::new(start, end)
    }
}
