//! Template translation service
//!
//! Wraps a [`TemplateMatcher`] with a result cache and request counters.
//! Every request yields a [`TranslationResult`]; failures are reported as
//! data with method `error` so a batch caller never has to stop on one bad
//! record.

use crate::cache::{CacheKey, TranslationCache};
use crate::config::TranslatorConfig;
use crate::error::TranslateResult;
use crate::matcher::TemplateMatcher;
use crate::stats::{percent, Counters, ServiceStats};
use crate::types::{EntityKind, TranslationResult};
use indexmap::IndexMap;
use menushield_safety::Dish;
use menushield_templates::TemplateSet;
use serde::Serialize;
use std::sync::Arc;

/// Anything with an id and a translatable name
pub trait NamedEntity {
    /// Stable identifier
    fn entity_id(&self) -> &str;
    /// Source-language name
    fn entity_name(&self) -> &str;
}

impl NamedEntity for Dish {
    fn entity_id(&self) -> &str {
        &self.id
    }

    fn entity_name(&self) -> &str {
        &self.name
    }
}

/// Every requested language for one entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityTranslations {
    /// Entity identifier
    pub id: String,
    /// Source-language name
    pub original_name: String,
    /// Result per language, request order
    pub translations: IndexMap<String, TranslationResult>,
}

/// Cached, counted template translation
#[derive(Debug)]
pub struct TemplateTranslationService {
    matcher: TemplateMatcher,
    cache: TranslationCache,
    counters: Counters,
    config: TranslatorConfig,
}

impl TemplateTranslationService {
    /// Create a service from configuration
    ///
    /// Loads templates from `config.template_dir` when set, else uses the
    /// bundled tables.
    ///
    /// # Errors
    ///
    /// Template loading or compilation errors.
    pub fn new(config: TranslatorConfig) -> TranslateResult<Self> {
        let templates = match &config.template_dir {
            Some(dir) => Arc::new(TemplateSet::from_dir(dir)?),
            None => TemplateSet::builtin()?,
        };
        Self::with_templates(config, templates)
    }

    /// Create a service over an explicit template set
    ///
    /// # Errors
    ///
    /// Template compilation errors.
    pub fn with_templates(
        config: TranslatorConfig,
        templates: Arc<TemplateSet>,
    ) -> TranslateResult<Self> {
        let matcher = TemplateMatcher::new(templates, config.thresholds)?;
        tracing::debug!(
            capacity = config.cache_capacity,
            categories = matcher.templates().dishes().len(),
            "translation service ready"
        );
        Ok(Self {
            matcher,
            cache: TranslationCache::from_config(&config),
            counters: Counters::default(),
            config,
        })
    }

    /// Service configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    /// Compiled matcher
    #[inline]
    #[must_use]
    pub fn matcher(&self) -> &TemplateMatcher {
        &self.matcher
    }

    /// Translate a name of the given kind
    ///
    /// Results are cached per `(text, language, kind)` regardless of
    /// success. Error results are neither cached nor counted as a match or
    /// no-match.
    pub async fn translate_text(
        &self,
        text: &str,
        language: &str,
        kind: EntityKind,
    ) -> TranslationResult {
        self.counters.request();

        let key = CacheKey::new(text, language, kind);
        if let Some(cached) = self.cache.get(&key).await {
            self.counters.cache_hit();
            return cached;
        }

        match self.matcher.translate(text, language, kind) {
            Ok(result) => {
                tracing::debug!(
                    %key,
                    success = result.success,
                    confidence = result.confidence,
                    category = result.category.as_deref().unwrap_or("-"),
                    "translated"
                );
                self.counters.outcome(result.success);
                self.cache.insert(key, result.clone()).await;
                result
            }
            Err(err) => {
                tracing::warn!(%key, error = %err, "translation failed");
                TranslationResult::failed(text, err)
            }
        }
    }

    /// Translate a dish name
    pub async fn translate_dish_name(&self, name: &str, language: &str) -> TranslationResult {
        self.translate_text(name, language, EntityKind::Dish).await
    }

    /// Translate an ingredient name
    pub async fn translate_ingredient_name(&self, name: &str, language: &str) -> TranslationResult {
        self.translate_text(name, language, EntityKind::Ingredient)
            .await
    }

    /// Translate a menu category name
    pub async fn translate_category_name(&self, name: &str, language: &str) -> TranslationResult {
        self.translate_text(name, language, EntityKind::Category)
            .await
    }

    /// Translate every entity's name into every language, sequentially
    pub async fn translate_dishes<E, S>(
        &self,
        entities: &[E],
        languages: &[S],
    ) -> Vec<EntityTranslations>
    where
        E: NamedEntity,
        S: AsRef<str>,
    {
        let mut results = Vec::with_capacity(entities.len());
        for entity in entities {
            let mut translations = IndexMap::with_capacity(languages.len());
            for language in languages {
                let language = language.as_ref();
                let result = self
                    .translate_dish_name(entity.entity_name(), language)
                    .await;
                translations.insert(language.to_string(), result);
            }
            results.push(EntityTranslations {
                id: entity.entity_id().to_string(),
                original_name: entity.entity_name().to_string(),
                translations,
            });
        }
        results
    }

    /// [`translate_dishes`](Self::translate_dishes) into the configured languages
    pub async fn translate_dishes_default<E>(&self, entities: &[E]) -> Vec<EntityTranslations>
    where
        E: NamedEntity,
    {
        self.translate_dishes(entities, &self.config.languages).await
    }

    /// Snapshot of counters and cache size
    pub async fn stats(&self) -> ServiceStats {
        let (total_requests, cache_hits, template_matches, no_matches) = self.counters.snapshot();
        let templates = self.matcher.templates();
        ServiceStats {
            total_requests,
            cache_hits,
            template_matches,
            no_matches,
            cache_hit_rate: percent(cache_hits, total_requests),
            success_rate: percent(template_matches, total_requests),
            cache_size: self.cache.entry_count().await,
            supported_categories: templates.category_names(),
            total_templates: templates.total_templates(),
        }
    }

    /// Drop every cached result; counters are kept
    pub async fn clear_cache(&self) {
        self.cache.clear().await;
        tracing::info!("translation cache cleared");
    }
}
