//! Bounded result cache keyed by content fingerprint.
//!
//! Entries are evicted in insertion order: reads never refresh an entry, so
//! once the cache is full the next insertion drops the oldest text. The
//! pipeline empties the cache whenever the design system is reloaded.

use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use sha2::{Digest, Sha256};

use crate::error::HashUnavailable;
use crate::extract::Extraction;

/// Default number of cached texts.
pub const DEFAULT_CACHE_CAPACITY: NonZeroUsize = match NonZeroUsize::new(50) {
    Some(capacity) => capacity,
    None => NonZeroUsize::MIN,
};

/// Hex digest identifying one exact text content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Wraps an already computed digest.
    #[must_use]
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    /// Returns the digest text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Computes content fingerprints.
pub trait ContentHasher {
    /// Fingerprints `text`.
    ///
    /// # Errors
    ///
    /// Returns [`HashUnavailable`] when no digest can be computed; the caller
    /// then skips the cache for that text.
    fn fingerprint(&self, text: &str) -> Result<Fingerprint, HashUnavailable>;
}

/// SHA-256 fingerprints rendered as lowercase hex.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Hasher;

impl ContentHasher for Sha256Hasher {
    fn fingerprint(&self, text: &str) -> Result<Fingerprint, HashUnavailable> {
        Ok(Fingerprint(format!("{:x}", Sha256::digest(text.as_bytes()))))
    }
}

/// Cache usage counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that found nothing.
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    /// Maximum number of entries.
    pub capacity: usize,
}

/// Insertion-ordered map from fingerprint to extraction results.
#[derive(Debug)]
pub struct ResultCache {
    entries: LruCache<Fingerprint, Arc<[Extraction]>>,
    hits: u64,
    misses: u64,
}

impl ResultCache {
    /// Creates an empty cache holding at most `capacity` texts.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Looks up `fingerprint`, counting the hit or miss.
    ///
    /// The entry's eviction position is left unchanged.
    pub fn get(&mut self, fingerprint: &Fingerprint) -> Option<Arc<[Extraction]>> {
        let found = self.entries.peek(fingerprint).cloned();
        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Looks up `fingerprint` without touching statistics.
    #[must_use]
    pub fn peek(&self, fingerprint: &Fingerprint) -> Option<&Arc<[Extraction]>> {
        self.entries.peek(fingerprint)
    }

    /// Stores `results` under `fingerprint`.
    ///
    /// A new fingerprint is inserted as the newest entry and, when the cache
    /// is full, the oldest entry is evicted and its fingerprint returned. An
    /// existing fingerprint has its results replaced in place.
    pub fn put(
        &mut self,
        fingerprint: Fingerprint,
        results: Arc<[Extraction]>,
    ) -> Option<Fingerprint> {
        if let Some(existing) = self.entries.peek_mut(&fingerprint) {
            *existing = results;
            return None;
        }
        self.entries.push(fingerprint, results).map(|(evicted, _)| evicted)
    }

    /// Removes every entry. Statistics are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns `true` when `fingerprint` is cached.
    #[must_use]
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        self.entries.contains(fingerprint)
    }

    /// Returns the number of cached texts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the maximum number of cached texts.
    #[must_use]
    pub fn capacity(&self) -> NonZeroUsize {
        self.entries.cap()
    }

    /// Returns usage counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.entries.len(),
            capacity: self.entries.cap().get(),
        }
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}
