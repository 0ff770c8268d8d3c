//! Stored entity records and their write-back updates

use crate::blob::{parse_translated_languages, parse_translations, TranslationsBlob};
use crate::display;
use menushield_translate::NamedEntity;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A dish, ingredient or category row as stored
///
/// `translations` and `translatedLanguages` are kept as raw JSON text; use
/// [`TranslatableRecord::translations`] and
/// [`TranslatableRecord::translated_languages`] for lenient parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatableRecord {
    /// Record identifier
    pub id: String,
    /// Source-language name
    pub name: String,
    /// Source-language description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Stored translations JSON
    #[serde(
        default,
        deserialize_with = "raw_json",
        skip_serializing_if = "Option::is_none"
    )]
    pub translations: Option<String>,
    /// Stored translated-languages JSON
    #[serde(
        default,
        deserialize_with = "raw_json",
        skip_serializing_if = "Option::is_none"
    )]
    pub translated_languages: Option<String>,
}

/// Accept a JSON string as-is, or any other JSON value as its text
fn raw_json<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    })
}

impl TranslatableRecord {
    /// Create a record with no stored translations
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            translations: None,
            translated_languages: None,
        }
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// With stored translations JSON
    #[inline]
    #[must_use]
    pub fn with_translations(mut self, json: impl Into<String>) -> Self {
        self.translations = Some(json.into());
        self
    }

    /// With stored translated-languages JSON
    #[inline]
    #[must_use]
    pub fn with_translated_languages(mut self, json: impl Into<String>) -> Self {
        self.translated_languages = Some(json.into());
        self
    }

    /// Parsed translations, empty when absent or invalid
    #[must_use]
    pub fn translations(&self) -> TranslationsBlob {
        parse_translations(self.translations.as_deref(), &self.id)
    }

    /// Parsed translated languages, empty when absent or invalid
    #[must_use]
    pub fn translated_languages(&self) -> Vec<String> {
        parse_translated_languages(self.translated_languages.as_deref(), &self.id)
    }

    /// Name to show for a language, falling back to the source name
    #[must_use]
    pub fn translated_name(&self, language: &str) -> String {
        display::translated_name(&self.name, self.translations.as_deref(), language)
    }

    /// Apply a write-back update
    pub fn apply(&mut self, update: &RecordUpdate) {
        self.translations = Some(update.translations.clone());
        self.translated_languages = Some(update.translated_languages.clone());
    }
}

impl NamedEntity for TranslatableRecord {
    fn entity_id(&self) -> &str {
        &self.id
    }

    fn entity_name(&self) -> &str {
        &self.name
    }
}

/// New values for both translation fields of one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordUpdate {
    /// Record identifier
    pub id: String,
    /// Serialized translations blob
    pub translations: String,
    /// Serialized language list
    pub translated_languages: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_string_or_object_fields() {
        let from_strings: TranslatableRecord = serde_json::from_str(
            r#"{"id":"1","name":"Pizza","translations":"{\"fi\":{\"name\":\"Pizza\"}}","translatedLanguages":"[\"fi\"]"}"#,
        )
        .unwrap();
        let from_values: TranslatableRecord = serde_json::from_str(
            r#"{"id":"1","name":"Pizza","translations":{"fi":{"name":"Pizza"}},"translatedLanguages":["fi"]}"#,
        )
        .unwrap();

        assert_eq!(from_strings.translated_languages(), vec!["fi"]);
        assert_eq!(from_values.translated_languages(), vec!["fi"]);
        assert_eq!(
            from_strings.translations().get("fi").and_then(|e| e.name().map(str::to_owned)),
            from_values.translations().get("fi").and_then(|e| e.name().map(str::to_owned))
        );
    }

    #[test]
    fn missing_fields_default() {
        let record: TranslatableRecord =
            serde_json::from_str(r#"{"id":"2","name":"Soup","translations":null}"#).unwrap();
        assert!(record.translations.is_none());
        assert!(record.translated_languages.is_none());
        assert!(record.translations().is_empty());
    }

    #[test]
    fn apply_replaces_both_fields() {
        let mut record = TranslatableRecord::new("3", "Tea").with_translations("{}");
        record.apply(&RecordUpdate {
            id: "3".to_string(),
            translations: r#"{"sv":{"name":"Te"}}"#.to_string(),
            translated_languages: r#"["sv"]"#.to_string(),
        });
        assert_eq!(record.translated_name("sv"), "Te");
        assert_eq!(record.translated_languages(), vec!["sv"]);
    }
}
