//! Translation engine configuration

use crate::types::EntityKind;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default cache capacity (entries)
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Minimum confidence per entity kind, inclusive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Dish names
    pub dish: u8,
    /// Ingredient names
    pub ingredient: u8,
    /// Menu category names
    pub category: u8,
}

impl Thresholds {
    /// Threshold for a kind
    #[inline]
    #[must_use]
    pub fn for_kind(&self, kind: EntityKind) -> u8 {
        match kind {
            EntityKind::Dish => self.dish,
            EntityKind::Ingredient => self.ingredient,
            EntityKind::Category => self.category,
        }
    }

    /// Whether a score is accepted for a kind
    #[inline]
    #[must_use]
    pub fn accepts(&self, kind: EntityKind, score: u8) -> bool {
        score >= self.for_kind(kind)
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            dish: EntityKind::Dish.default_threshold(),
            ingredient: EntityKind::Ingredient.default_threshold(),
            category: EntityKind::Category.default_threshold(),
        }
    }
}

/// Translation service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    /// Maximum cached results
    pub cache_capacity: u64,
    /// Cached result lifetime in seconds, unlimited when absent
    pub cache_ttl_secs: Option<u64>,
    /// Acceptance thresholds
    pub thresholds: Thresholds,
    /// Target languages for bulk operations
    pub languages: Vec<String>,
    /// Directory overriding the bundled template tables
    pub template_dir: Option<PathBuf>,
}

impl TranslatorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With cache capacity
    #[inline]
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// With cache entry lifetime
    #[inline]
    #[must_use]
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl_secs = Some(ttl.as_secs());
        self
    }

    /// With acceptance thresholds
    #[inline]
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// With target languages
    #[must_use]
    pub fn with_languages<I, S>(mut self, languages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.languages = languages.into_iter().map(Into::into).collect();
        self
    }

    /// With template directory
    #[inline]
    #[must_use]
    pub fn with_template_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.template_dir = Some(dir.into());
        self
    }

    /// Cache entry lifetime
    #[inline]
    #[must_use]
    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs.map(Duration::from_secs)
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_ttl_secs: None,
            thresholds: Thresholds::default(),
            languages: vec!["fi".to_string(), "sv".to_string()],
            template_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        let t = Thresholds::default();
        assert!(!t.accepts(EntityKind::Dish, 59));
        assert!(t.accepts(EntityKind::Dish, 60));
        assert!(!t.accepts(EntityKind::Ingredient, 69));
        assert!(t.accepts(EntityKind::Ingredient, 70));
        assert!(!t.accepts(EntityKind::Category, 79));
        assert!(t.accepts(EntityKind::Category, 80));
    }

    #[test]
    fn builder_sets_fields() {
        let config = TranslatorConfig::new()
            .with_cache_capacity(5)
            .with_cache_ttl(Duration::from_secs(30))
            .with_languages(["sv"]);
        assert_eq!(config.cache_capacity, 5);
        assert_eq!(config.cache_ttl(), Some(Duration::from_secs(30)));
        assert_eq!(config.languages, vec!["sv"]);
    }

    #[test]
    fn defaults() {
        let config = TranslatorConfig::default();
        assert_eq!(config.cache_capacity, 10_000);
        assert_eq!(config.languages, vec!["fi", "sv"]);
        assert!(config.cache_ttl().is_none());
    }
}
