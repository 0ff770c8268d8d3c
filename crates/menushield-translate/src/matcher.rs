//! Template scoring
//!
//! Each category of the table for the requested [`EntityKind`] is scored
//! against the lower-cased, trimmed input:
//!
//! | signal | points | condition |
//! |--------|--------|-----------|
//! | exact name | +90 | first translation key contained in the input |
//! | pattern | +70 | only while the score is below 90 |
//! | component | +15 each | only once the score is above 0 |
//!
//! Scores are clamped to 100. The highest-scoring category wins; ties go to
//! the category declared first.

use crate::compose::{compile_phrases, compose, Substitution};
use crate::config::Thresholds;
use crate::error::{TranslateError, TranslateResult};
use crate::types::{EntityKind, MatchType, TranslationMethod, TranslationResult};
use menushield_templates::{LocalizedTerm, TemplateSet, TemplateTable};
use std::sync::Arc;

const EXACT_NAME_SCORE: u32 = 90;
const PATTERN_SCORE: u32 = 70;
const COMPONENT_SCORE: u32 = 15;
const MAX_SCORE: u32 = 100;

/// Score of one category against one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryScore {
    /// Clamped score, 0..=100
    pub score: u8,
    /// Candidate translation
    pub translation: String,
    /// Strongest signal seen
    pub match_type: MatchType,
}

#[derive(Debug, Clone)]
struct CompiledCategory {
    name: String,
    exact: Vec<(String, LocalizedTerm)>,
    patterns: Vec<String>,
    components: Vec<Substitution>,
}

impl CompiledCategory {
    fn score(
        &self,
        cleaned: &str,
        original: &str,
        language: &str,
        phrases: &[Substitution],
    ) -> CategoryScore {
        let mut score = 0;
        let mut translation = original.to_string();
        let mut match_type = MatchType::None;

        if let Some((_, term)) = self
            .exact
            .iter()
            .find(|(key, _)| cleaned.contains(key.as_str()))
        {
            score += EXACT_NAME_SCORE;
            if let Some(rendering) = term.get(language) {
                translation = rendering.to_string();
            }
            match_type = MatchType::ExactName;
        }

        if score < EXACT_NAME_SCORE
            && self.patterns.iter().any(|p| cleaned.contains(p.as_str()))
        {
            score += PATTERN_SCORE;
            match_type = MatchType::Pattern;
        }

        if score > 0 && !self.components.is_empty() {
            let hits = self.components.iter().filter(|c| c.contained_in(cleaned)).count();
            score += COMPONENT_SCORE * u32::try_from(hits).unwrap_or(u32::MAX / COMPONENT_SCORE);
            if hits > 0 && match_type != MatchType::ExactName {
                translation = compose(original, &self.components, phrases, language);
            }
        }

        CategoryScore {
            score: u8::try_from(score.min(MAX_SCORE)).unwrap_or(u8::MAX),
            translation,
            match_type,
        }
    }
}

fn compile_table(table: &TemplateTable) -> TranslateResult<Vec<CompiledCategory>> {
    table
        .iter()
        .map(|(name, template)| -> TranslateResult<CompiledCategory> {
            Ok(CompiledCategory {
                name: name.to_string(),
                exact: template
                    .translations
                    .iter()
                    .map(|(key, term)| (key.trim().to_lowercase(), term.clone()))
                    .collect(),
                patterns: template
                    .patterns
                    .iter()
                    .map(|p| p.trim().to_lowercase())
                    .collect(),
                components: template
                    .components
                    .iter()
                    .map(|(key, term)| Substitution::new(key, term.clone()))
                    .collect::<TranslateResult<_>>()?,
            })
        })
        .collect()
}

/// Compiled template set that scores inputs
#[derive(Debug, Clone)]
pub struct TemplateMatcher {
    templates: Arc<TemplateSet>,
    dishes: Vec<CompiledCategory>,
    ingredients: Vec<CompiledCategory>,
    categories: Vec<CompiledCategory>,
    phrases: Vec<Substitution>,
    thresholds: Thresholds,
}

impl TemplateMatcher {
    /// Compile a template set
    ///
    /// # Errors
    ///
    /// [`TranslateError::Pattern`] if a term cannot be compiled.
    pub fn new(templates: Arc<TemplateSet>, thresholds: Thresholds) -> TranslateResult<Self> {
        let mut phrases = compile_phrases(templates.preparations())?;
        phrases.extend(compile_phrases(templates.descriptions())?);

        Ok(Self {
            dishes: compile_table(templates.dishes())?,
            ingredients: compile_table(templates.ingredients())?,
            categories: compile_table(templates.categories())?,
            phrases,
            thresholds,
            templates,
        })
    }

    /// Underlying template set
    #[inline]
    #[must_use]
    pub fn templates(&self) -> &TemplateSet {
        &self.templates
    }

    /// Acceptance thresholds in use
    #[inline]
    #[must_use]
    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    fn table(&self, kind: EntityKind) -> &[CompiledCategory] {
        match kind {
            EntityKind::Dish => &self.dishes,
            EntityKind::Ingredient => &self.ingredients,
            EntityKind::Category => &self.categories,
        }
    }

    /// Score one named category, if it exists
    #[must_use]
    pub fn score_category(
        &self,
        kind: EntityKind,
        category: &str,
        text: &str,
        language: &str,
    ) -> Option<CategoryScore> {
        let original = text.trim();
        let cleaned = original.to_lowercase();
        self.table(kind)
            .iter()
            .find(|c| c.name == category)
            .map(|c| c.score(&cleaned, original, language, &self.phrases))
    }

    /// Best category for an input, ties to the first declared
    ///
    /// `None` when no category scores above zero.
    #[must_use]
    pub fn best_match(
        &self,
        kind: EntityKind,
        text: &str,
        language: &str,
    ) -> Option<(&str, CategoryScore)> {
        let original = text.trim();
        let cleaned = original.to_lowercase();

        let mut best: Option<(&str, CategoryScore)> = None;
        for category in self.table(kind) {
            let candidate = category.score(&cleaned, original, language, &self.phrases);
            let best_score = best.as_ref().map_or(0, |(_, b)| b.score);
            if candidate.score > best_score {
                best = Some((category.name.as_str(), candidate));
            }
        }
        best
    }

    /// Translate one input without caching
    ///
    /// # Errors
    ///
    /// [`TranslateError::BlankText`] or [`TranslateError::InvalidLanguage`].
    pub fn translate(
        &self,
        text: &str,
        language: &str,
        kind: EntityKind,
    ) -> TranslateResult<TranslationResult> {
        if text.trim().is_empty() {
            return Err(TranslateError::BlankText);
        }
        if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(TranslateError::InvalidLanguage(language.to_string()));
        }

        let result = match self.best_match(kind, text, language) {
            Some((category, best)) if self.thresholds.accepts(kind, best.score) => TranslationResult {
                success: true,
                translation: best.translation,
                confidence: best.score,
                method: kind.method(),
                category: Some(category.to_string()),
                original: text.to_string(),
                error: None,
            },
            best => TranslationResult {
                success: false,
                translation: text.to_string(),
                confidence: best.map_or(0, |(_, b)| b.score),
                method: TranslationMethod::NoMatch,
                category: None,
                original: text.to_string(),
                error: None,
            },
        };
        Ok(result)
    }
}
