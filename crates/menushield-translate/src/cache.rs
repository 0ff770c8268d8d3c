//! Bounded translation result cache using moka
//!
//! One cache lives inside each service instance, so a backfill job that owns
//! its service also owns (and drops) its cache.

use crate::config::TranslatorConfig;
use crate::types::{EntityKind, TranslationResult};
use moka::future::Cache;
use std::time::Duration;

/// Cache key: input text, target language and entity kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Input text as given
    pub text: String,
    /// Target language
    pub language: String,
    /// Entity kind
    pub kind: EntityKind,
}

impl CacheKey {
    /// Create new key
    #[inline]
    #[must_use]
    pub fn new(text: impl Into<String>, language: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
            kind,
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}-{}", self.text, self.language, self.kind)
    }
}

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
}

/// Concurrent LRU cache of translation results
#[derive(Debug, Clone)]
pub struct TranslationCache {
    inner: Cache<CacheKey, TranslationResult>,
}

impl TranslationCache {
    /// Create new cache with max capacity
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Create cache with time-based expiration
    #[inline]
    #[must_use]
    pub fn with_ttl(max_capacity: u64, ttl: Duration) -> Self {
        Self {
            inner: Cache::builder()
                .max_capacity(max_capacity)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Create cache sized by configuration
    #[must_use]
    pub fn from_config(config: &TranslatorConfig) -> Self {
        match config.cache_ttl() {
            Some(ttl) => Self::with_ttl(config.cache_capacity, ttl),
            None => Self::new(config.cache_capacity),
        }
    }

    /// Cached result for a key
    #[inline]
    pub async fn get(&self, key: &CacheKey) -> Option<TranslationResult> {
        self.inner.get(key).await
    }

    /// Store a result
    #[inline]
    pub async fn insert(&self, key: CacheKey, result: TranslationResult) {
        self.inner.insert(key, result).await;
    }

    /// Invalidate every entry
    pub async fn clear(&self) {
        self.inner.invalidate_all();
        self.inner.run_pending_tasks().await;
    }

    /// Exact entry count after pending maintenance
    pub async fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks().await;
        self.inner.entry_count()
    }

    /// Get cache statistics
    pub async fn stats(&self) -> CacheStats {
        CacheStats {
            entry_count: self.entry_count().await,
        }
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::from_config(&TranslatorConfig::default())
    }
}
