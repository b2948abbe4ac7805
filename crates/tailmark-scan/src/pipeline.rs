//! The host-facing extraction pipeline.
//!
//! A [`Pipeline`] owns the current design-system context and the result
//! cache. `reload` swaps the context and empties the cache together;
//! `decorate` extracts through the cache; `hover_at` only ever reads it.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Instant;

use tailmark_core::{
    ContextLoader, DesignSystemVersion, MatchResult, SourceConfig, Span, ValidatorContext,
};
use tracing::{debug, info, warn};

use crate::cache::{CacheStats, ContentHasher, DEFAULT_CACHE_CAPACITY, ResultCache, Sha256Hasher};
use crate::error::{PatternError, ReloadError};
use crate::extract::{Extraction, Extractor};
use crate::render::render;

const PIPELINE_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::pipeline");

/// Construction options for a [`Pipeline`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Maximum number of cached texts.
    pub cache_capacity: NonZeroUsize,
    /// Inclusion patterns appended after the built-in ones.
    pub include_patterns: Vec<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            include_patterns: Vec::new(),
        }
    }
}

/// Extraction, validation and caching over one design system at a time.
pub struct Pipeline {
    loader: Box<dyn ContextLoader>,
    hasher: Box<dyn ContentHasher>,
    extractor: Extractor,
    context: Option<ValidatorContext>,
    cache: ResultCache,
}

impl Pipeline {
    /// Creates a pipeline with no design system loaded.
    ///
    /// # Errors
    ///
    /// Returns a [`PatternError`] when an extra inclusion pattern does not
    /// compile.
    pub fn new(
        loader: Box<dyn ContextLoader>,
        options: &PipelineOptions,
    ) -> Result<Self, PatternError> {
        Ok(Self {
            loader,
            hasher: Box::new(Sha256Hasher),
            extractor: Extractor::new(&options.include_patterns)?,
            context: None,
            cache: ResultCache::new(options.cache_capacity),
        })
    }

    /// Replaces the content hasher.
    #[must_use]
    pub fn with_hasher(mut self, hasher: Box<dyn ContentHasher>) -> Self {
        self.hasher = hasher;
        self
    }

    /// Loads the design system described by `source`.
    ///
    /// On success the new context replaces the old one and the cache is
    /// emptied. On failure the previous context and cache are kept.
    ///
    /// # Errors
    ///
    /// Returns [`ReloadError::ConfigurationUnavailable`] when the loader
    /// fails.
    pub fn reload(&mut self, source: &SourceConfig) -> Result<(), ReloadError> {
        let started = Instant::now();
        info!(
            target: PIPELINE_TARGET,
            version = %source.version(),
            "loading design system"
        );
        let context = self.loader.load(source).inspect_err(|error| {
            warn!(
                target: PIPELINE_TARGET,
                error = %error,
                "design system load failed; keeping previous context"
            );
        })?;
        let version = context.version();
        self.context = Some(context);
        self.cache.clear();
        info!(
            target: PIPELINE_TARGET,
            %version,
            elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "design system loaded"
        );
        Ok(())
    }

    /// Returns the spans of confirmed class tokens in `text`.
    ///
    /// Results are served from the cache when this exact text was decorated
    /// before; otherwise they are extracted and cached. Without a loaded
    /// design system the result is empty.
    pub fn decorate(&mut self, text: &str) -> Vec<Span> {
        self.extractions(text)
            .iter()
            .map(Extraction::span)
            .collect()
    }

    /// Returns confirmed tokens of `text` with their generated rules.
    ///
    /// Behaves like [`decorate`](Self::decorate) with respect to the cache.
    pub fn extractions(&mut self, text: &str) -> Arc<[Extraction]> {
        let Some(context) = self.context.as_ref() else {
            debug!(target: PIPELINE_TARGET, "no design system loaded");
            return Arc::from(Vec::<Extraction>::new());
        };

        let fingerprint = match self.hasher.fingerprint(text) {
            Ok(fingerprint) => fingerprint,
            Err(error) => {
                warn!(
                    target: PIPELINE_TARGET,
                    error = %error,
                    "fingerprint unavailable; extracting without cache"
                );
                return Arc::from(self.extractor.extract(text, context));
            }
        };

        if let Some(cached) = self.cache.get(&fingerprint) {
            debug!(
                target: PIPELINE_TARGET,
                fingerprint = fingerprint.as_str(),
                "result cache hit"
            );
            return cached;
        }

        debug!(
            target: PIPELINE_TARGET,
            fingerprint = fingerprint.as_str(),
            "result cache miss"
        );
        let results: Arc<[Extraction]> = Arc::from(self.extractor.extract(text, context));
        if let Some(evicted) = self.cache.put(fingerprint, Arc::clone(&results)) {
            debug!(
                target: PIPELINE_TARGET,
                evicted = evicted.as_str(),
                "result cache evicted oldest entry"
            );
        }
        results
    }

    /// Returns the cached match covering the UTF-16 `offset` of `text`,
    /// with its rule rendered as style-sheet text.
    ///
    /// Never extracts: text that has not been decorated since the last
    /// reload yields `None`. A rule that fails to render yields a match
    /// without style text.
    #[must_use]
    pub fn hover_at(&self, text: &str, offset: u32) -> Option<MatchResult> {
        let fingerprint = self.hasher.fingerprint(text).ok()?;
        let cached = self.cache.peek(&fingerprint)?;
        let hit = cached
            .iter()
            .find(|extraction| extraction.span().contains_offset(offset))?;

        let style_text = render(hit.rule())
            .inspect_err(|error| {
                debug!(
                    target: PIPELINE_TARGET,
                    token = hit.text(),
                    error = %error,
                    "rule could not be rendered"
                );
            })
            .ok();
        Some(MatchResult::new(hit.span(), style_text))
    }

    /// Returns `true` once a design system has been loaded.
    #[must_use]
    pub const fn has_context(&self) -> bool {
        self.context.is_some()
    }

    /// Returns the version of the loaded design system.
    #[must_use]
    pub fn version(&self) -> Option<DesignSystemVersion> {
        self.context.as_ref().map(ValidatorContext::version)
    }

    /// Returns `true` when results for `text` are cached.
    #[must_use]
    pub fn is_cached(&self, text: &str) -> bool {
        self.hasher
            .fingerprint(text)
            .is_ok_and(|fingerprint| self.cache.contains(&fingerprint))
    }

    /// Returns result cache counters.
    #[must_use]
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("extractor", &self.extractor)
            .field("context", &self.context)
            .field("cache", &self.cache)
            .finish_non_exhaustive()
    }
}
