//! Guest-facing lookups over stored translations
//!
//! `en` is the source language and always shows the stored text. For any
//! other language a missing or unparsable entry falls back to the source
//! text, so a guest never sees a translation failure.

use crate::blob::{parse_translated_languages, parse_translations, TranslationEntry};

/// Source language of stored names
pub const SOURCE_LANGUAGE: &str = "en";

/// Name to show in `language`
#[must_use]
pub fn translated_name(name: &str, translations: Option<&str>, language: &str) -> String {
    if language == SOURCE_LANGUAGE {
        return name.to_string();
    }
    parse_translations(translations, name)
        .get(language)
        .and_then(|entry| entry.name())
        .map_or_else(|| name.to_string(), str::to_string)
}

/// Description to show in `language`
#[must_use]
pub fn translated_description(
    description: Option<&str>,
    translations: Option<&str>,
    language: &str,
) -> Option<String> {
    if language == SOURCE_LANGUAGE {
        return description.map(str::to_string);
    }
    parse_translations(translations, description.unwrap_or_default())
        .get(language)
        .and_then(|entry| entry.description())
        .or(description)
        .map(str::to_string)
}

/// Whether `language` is listed as translated
#[must_use]
pub fn has_translation(translated_languages: Option<&str>, language: &str) -> bool {
    language == SOURCE_LANGUAGE
        || parse_translated_languages(translated_languages, "")
            .iter()
            .any(|l| l == language)
}

/// Stored confidence for `language`; the source language is always 100
#[must_use]
pub fn translation_confidence(translations: Option<&str>, language: &str) -> Option<f64> {
    if language == SOURCE_LANGUAGE {
        return Some(100.0);
    }
    parse_translations(translations, "")
        .get(language)
        .and_then(TranslationEntry::confidence)
}

/// Source language followed by every listed language, without repeats
#[must_use]
pub fn available_languages(translated_languages: Option<&str>) -> Vec<String> {
    let mut languages = vec![SOURCE_LANGUAGE.to_string()];
    for language in parse_translated_languages(translated_languages, "") {
        if !languages.contains(&language) {
            languages.push(language);
        }
    }
    languages
}

/// Translated name, optionally suffixed with its confidence, e.g. `"Kanakeitto (90%)"`
#[must_use]
pub fn format_translated_content(
    name: &str,
    translations: Option<&str>,
    language: &str,
    show_confidence: bool,
) -> String {
    let translated = translated_name(name, translations, language);
    if !show_confidence || language == SOURCE_LANGUAGE {
        return translated;
    }
    match translation_confidence(translations, language) {
        Some(confidence) if confidence > 0.0 => format!("{translated} ({confidence}%)"),
        _ => translated,
    }
}
