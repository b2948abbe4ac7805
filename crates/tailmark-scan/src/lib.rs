//! Extraction, validation and caching of utility-class tokens.
//!
//! The pipeline finds class-like tokens in arbitrary source text, asks the
//! loaded design system which of them generate a style rule, and reports the
//! confirmed tokens as UTF-16 spans of the original text:
//!
//! 1. Inclusion patterns (quoted string literals and `@apply …;` statements)
//!    mark the regions of the text in which tokens count.
//! 2. The design-system tokenizer produces candidate tokens.
//! 3. The validator confirms candidates, each distinct token once.
//! 4. A forward cursor recovers every token's position; valid tokens outside
//!    all included regions are dropped.
//! 5. Results are cached per exact text content and rendered to style-sheet
//!    text on hover.
//!
//! [`Pipeline`] is the entry point for hosts. The design system itself is
//! supplied through a [`ContextLoader`](tailmark_core::ContextLoader).

mod cache;
mod error;
mod extract;
mod include;
mod lookup;
mod pipeline;
mod position;
mod render;
mod resolve;

pub use cache::{
    CacheStats, ContentHasher, DEFAULT_CACHE_CAPACITY, Fingerprint, ResultCache, Sha256Hasher,
};
pub use error::{HashUnavailable, PatternError, ReloadError, RenderError};
pub use extract::{Extraction, Extractor};
pub use include::InclusionPatterns;
pub use lookup::CandidateLookup;
pub use pipeline::{Pipeline, PipelineOptions};
pub use render::{MAX_RENDER_DEPTH, annotate_color, render};

#[cfg(test)]
mod tests;
