//! Persisted translation blobs
//!
//! Each stored entity carries two JSON strings:
//!
//! - `translations`: `{"fi": {"name": "...", "confidence": 90, "method": "template"}, ...}`
//! - `translatedLanguages`: `["fi", "sv"]`
//!
//! Other services read these fields, so entries keep any fields they already
//! had and new entries serialize exactly as `{name, confidence, method}`.
//! Reading never fails: unparsable input resets to an empty value.

use crate::error::BackfillResult;
use indexmap::IndexMap;
use menushield_translate::TranslationResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Translation of one entity into one language
///
/// Held as the stored JSON value, whatever its shape, so entries written by
/// other tools round-trip unchanged. Accessors read the conventional fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationEntry(Value);

impl Default for TranslationEntry {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl TranslationEntry {
    /// Set name, confidence and method from a result, keeping other fields
    ///
    /// A stored entry that is not an object is replaced by one.
    pub fn apply(&mut self, result: &TranslationResult) {
        if !self.0.is_object() {
            self.0 = Value::Object(Map::new());
        }
        if let Value::Object(fields) = &mut self.0 {
            fields.insert("name".into(), Value::String(result.translation.clone()));
            fields.insert("confidence".into(), Value::Number(Number::from(result.confidence)));
            fields.insert("method".into(), Value::String(result.method.as_str().into()));
        }
    }

    /// Raw stored field
    #[inline]
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.field(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Non-empty translated name
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.text("name")
    }

    /// Non-empty translated description
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.text("description")
    }

    /// How the translation was produced
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.text("method")
    }

    /// Stored confidence; numeric strings are accepted
    #[must_use]
    pub fn confidence(&self) -> Option<f64> {
        match self.field("confidence")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// The stored value as-is
    #[inline]
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

/// Language code to translation entry, stored order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationsBlob(IndexMap<String, TranslationEntry>);

impl TranslationsBlob {
    /// Entry for a language
    #[inline]
    #[must_use]
    pub fn get(&self, language: &str) -> Option<&TranslationEntry> {
        self.0.get(language)
    }

    /// Merge a successful result, keeping unrelated fields of an existing entry
    pub fn merge(&mut self, language: &str, result: &TranslationResult) {
        self.0
            .entry(language.to_string())
            .or_default()
            .apply(result);
    }

    /// Languages present, stored order
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of languages
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no language is present
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Serialize for storage
    ///
    /// # Errors
    ///
    /// [`crate::BackfillError::Serialize`] on serializer failure.
    pub fn to_json(&self) -> BackfillResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Parse a stored `translations` field
///
/// Absent or blank input is an empty blob. Any JSON object is accepted with
/// its entries kept verbatim; invalid JSON or a non-object value is logged
/// and reset to an empty blob.
#[must_use]
pub fn parse_translations(raw: Option<&str>, record_id: &str) -> TranslationsBlob {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return TranslationsBlob::default();
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(entries)) => TranslationsBlob(
            entries
                .into_iter()
                .map(|(language, entry)| (language, TranslationEntry(entry)))
                .collect(),
        ),
        Ok(_) => {
            tracing::warn!(record_id, "translations is not an object, resetting");
            TranslationsBlob::default()
        }
        Err(err) => {
            tracing::warn!(record_id, error = %err, "invalid translations JSON, resetting");
            TranslationsBlob::default()
        }
    }
}

/// Parse a stored `translatedLanguages` field
///
/// Absent or blank input is an empty list. Invalid JSON or a non-array value
/// is logged and reset to an empty list; non-string array items are dropped.
#[must_use]
pub fn parse_translated_languages(raw: Option<&str>, record_id: &str) -> Vec<String> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Vec::new();
    };
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(language) => Some(language),
                _ => None,
            })
            .collect(),
        Ok(_) => {
            tracing::warn!(record_id, "translatedLanguages is not an array, resetting");
            Vec::new()
        }
        Err(err) => {
            tracing::warn!(record_id, error = %err, "invalid translatedLanguages JSON, resetting");
            Vec::new()
        }
    }
}

/// Serialize a language list for storage
///
/// # Errors
///
/// [`crate::BackfillError::Serialize`] on serializer failure.
pub fn languages_to_json(languages: &[String]) -> BackfillResult<String> {
    Ok(serde_json::to_string(languages)?)
}
