//! Batch translation backfill
//!
//! Reads every record of one kind, translates each name into every
//! configured language not yet listed in `translatedLanguages`, and writes
//! changed records back one batch at a time. A failing batch is counted and
//! skipped; the run continues with the next batch.

use crate::blob::{languages_to_json, TranslationsBlob};
use crate::error::BackfillResult;
use crate::record::{RecordUpdate, TranslatableRecord};
use crate::store::EntityStore;
use indexmap::IndexMap;
use menushield_translate::{EntityKind, TemplateTranslationService};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Default records per write-back batch
pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Backfill configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackfillConfig {
    /// Languages to fill in, in order
    pub languages: Vec<String>,
    /// Records per write-back batch
    pub batch_size: usize,
    /// Pause between batches in milliseconds
    pub batch_delay_ms: u64,
}

impl BackfillConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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

    /// With batch size; zero is treated as one
    #[inline]
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// With pause between batches
    #[inline]
    #[must_use]
    pub fn with_batch_delay(mut self, delay: Duration) -> Self {
        self.batch_delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// Pause between batches
    #[inline]
    #[must_use]
    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }
}

impl Default for BackfillConfig {
    fn default() -> Self {
        Self {
            languages: vec!["fi".to_string(), "sv".to_string()],
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay_ms: 0,
        }
    }
}

/// Outcome of one backfill run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BackfillReport {
    /// Records read
    pub total: usize,
    /// Records that gained at least one translation
    pub translated: usize,
    /// Records written back
    pub updated: usize,
    /// Records in failed batches
    pub errors: usize,
    /// New translations per language
    pub by_language: IndexMap<String, usize>,
}

impl BackfillReport {
    fn for_languages(languages: &[String]) -> Self {
        Self {
            by_language: languages.iter().map(|l| (l.clone(), 0)).collect(),
            ..Self::default()
        }
    }
}

/// How far a set of records is translated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationStatus {
    /// Records inspected
    pub total: usize,
    /// Records listing each language
    pub by_language: IndexMap<String, usize>,
    /// Records listing every language
    pub with_all: usize,
    /// Records listing none of the languages
    pub with_none: usize,
}

/// Count which records already list which languages
#[must_use]
pub fn translation_status(records: &[TranslatableRecord], languages: &[String]) -> TranslationStatus {
    let mut status = TranslationStatus {
        total: records.len(),
        by_language: languages.iter().map(|l| (l.clone(), 0)).collect(),
        ..TranslationStatus::default()
    };

    for record in records {
        let listed = record.translated_languages();
        let mut present = 0;
        for language in languages {
            if listed.contains(language) {
                present += 1;
                if let Some(count) = status.by_language.get_mut(language) {
                    *count += 1;
                }
            }
        }
        if present == languages.len() {
            status.with_all += 1;
        }
        if present == 0 {
            status.with_none += 1;
        }
    }
    status
}

/// Backfill job over one translation service
#[derive(Debug, Clone)]
pub struct Backfiller {
    service: Arc<TemplateTranslationService>,
    config: BackfillConfig,
}

impl Backfiller {
    /// Create a job
    #[inline]
    #[must_use]
    pub fn new(service: Arc<TemplateTranslationService>, config: BackfillConfig) -> Self {
        Self { service, config }
    }

    /// Job configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &BackfillConfig {
        &self.config
    }

    /// Translation service in use
    #[inline]
    #[must_use]
    pub fn service(&self) -> &TemplateTranslationService {
        &self.service
    }

    /// Run over every record of `kind`
    ///
    /// # Errors
    ///
    /// Only a failure to read the records. Write-back failures are counted
    /// in [`BackfillReport::errors`].
    pub async fn run<S>(&self, store: &S, kind: EntityKind) -> BackfillResult<BackfillReport>
    where
        S: EntityStore + ?Sized,
    {
        let records = store.fetch_all(kind).await?;
        let mut report = BackfillReport::for_languages(&self.config.languages);
        report.total = records.len();

        let batch_size = self.config.batch_size.max(1);
        let batches = records.len().div_ceil(batch_size);
        tracing::info!(%kind, records = records.len(), batches, "starting backfill");

        for (index, batch) in records.chunks(batch_size).enumerate() {
            if index > 0 && self.config.batch_delay_ms > 0 {
                tokio::time::sleep(self.config.batch_delay()).await;
            }
            tracing::debug!(batch = index + 1, of = batches, size = batch.len(), "processing batch");

            let mut updates = Vec::new();
            for record in batch {
                match self.plan_update(record, kind, &mut report).await {
                    Ok(Some(update)) => updates.push(update),
                    Ok(None) => {}
                    Err(err) => {
                        tracing::error!(record_id = %record.id, error = %err, "record failed");
                        report.errors += 1;
                    }
                }
            }
            if updates.is_empty() {
                continue;
            }

            match store.apply_updates(kind, &updates).await {
                Ok(()) => {
                    report.updated += updates.len();
                    tracing::debug!(updated = updates.len(), "batch written");
                }
                Err(err) => {
                    tracing::error!(batch = index + 1, error = %err, "batch update failed");
                    report.errors += updates.len();
                }
            }
        }

        tracing::info!(
            %kind,
            total = report.total,
            translated = report.translated,
            updated = report.updated,
            errors = report.errors,
            "backfill complete"
        );
        Ok(report)
    }

    /// Translate one record into every missing language
    ///
    /// Returns the write-back update when at least one language was added.
    /// Per-language counts and `translated` are recorded in `report`.
    ///
    /// # Errors
    ///
    /// Serialization of the new blobs.
    pub async fn plan_update(
        &self,
        record: &TranslatableRecord,
        kind: EntityKind,
        report: &mut BackfillReport,
    ) -> BackfillResult<Option<RecordUpdate>> {
        let mut translations: TranslationsBlob = record.translations();
        let mut languages = record.translated_languages();
        let mut changed = false;

        for language in &self.config.languages {
            if languages.contains(language) {
                continue;
            }
            let result = self.service.translate_text(&record.name, language, kind).await;
            if result.success && result.changed() {
                translations.merge(language, &result);
                languages.push(language.clone());
                *report.by_language.entry(language.clone()).or_default() += 1;
                changed = true;
                tracing::trace!(
                    record_id = %record.id,
                    %language,
                    translation = %result.translation,
                    confidence = result.confidence,
                    "translation added"
                );
            }
        }

        if !changed {
            return Ok(None);
        }
        report.translated += 1;
        Ok(Some(RecordUpdate {
            id: record.id.clone(),
            translations: translations.to_json()?,
            translated_languages: languages_to_json(&languages)?,
        }))
    }
}
