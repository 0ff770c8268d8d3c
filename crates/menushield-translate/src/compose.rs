//! Composed translations
//!
//! When no whole-name template fits, a translation is assembled by replacing
//! known sub-terms of the input in place: category components first, then
//! preparation verbs, then connectors. Replacement is whole-word and
//! case-insensitive, and only terms present in the input are touched.

use crate::error::{TranslateError, TranslateResult};
use menushield_templates::{LocalizedTerm, PhraseTable};
use regex::{NoExpand, Regex};

/// One English term compiled for scoring and replacement
#[derive(Debug, Clone)]
pub struct Substitution {
    needle: String,
    pattern: Regex,
    term: LocalizedTerm,
}

impl Substitution {
    /// Compile a term
    ///
    /// # Errors
    ///
    /// [`TranslateError::Pattern`] if the escaped term fails to compile.
    pub fn new(english: &str, term: LocalizedTerm) -> TranslateResult<Self> {
        let needle = english.trim().to_lowercase();
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&needle))).map_err(
            |source| TranslateError::Pattern {
                term: english.to_string(),
                source,
            },
        )?;
        Ok(Self {
            needle,
            pattern,
            term,
        })
    }

    /// Lower-case English term
    #[inline]
    #[must_use]
    pub fn needle(&self) -> &str {
        &self.needle
    }

    /// Substring containment against lower-cased input, as used for scoring
    #[inline]
    #[must_use]
    pub fn contained_in(&self, cleaned: &str) -> bool {
        cleaned.contains(&self.needle)
    }

    /// Replace every whole-word occurrence in `text` when `source` has one
    ///
    /// A missing rendering leaves the English term in place.
    fn apply(&self, source: &str, text: String, language: &str) -> String {
        if !self.pattern.is_match(source) {
            return text;
        }
        match self.term.get(language) {
            Some(rendering) => self
                .pattern
                .replace_all(&text, NoExpand(rendering))
                .into_owned(),
            None => text,
        }
    }
}

/// Compile every phrase of a table in declaration order
///
/// # Errors
///
/// The first phrase that fails to compile.
pub fn compile_phrases(table: &PhraseTable) -> TranslateResult<Vec<Substitution>> {
    table
        .iter()
        .map(|(phrase, term)| Substitution::new(phrase, term.clone()))
        .collect()
}

/// Build a composed translation of `original`
///
/// `components` are applied first, then `phrases`. If `original` starts with
/// an upper-case letter so does the result.
#[must_use]
pub fn compose(
    original: &str,
    components: &[Substitution],
    phrases: &[Substitution],
    language: &str,
) -> String {
    let composed = components
        .iter()
        .chain(phrases)
        .fold(original.to_string(), |text, sub| sub.apply(original, text, language));

    if original.chars().next().is_some_and(char::is_uppercase) {
        sentence_case(&composed)
    } else {
        composed
    }
}

fn sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
