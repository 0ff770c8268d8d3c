//! Translation request and result types

use serde::{Deserialize, Serialize};

/// What kind of name is being translated
///
/// Selects the template table, the acceptance threshold and the success
/// method label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Dish names
    #[default]
    Dish,
    /// Ingredient names
    Ingredient,
    /// Menu category names
    Category,
}

impl EntityKind {
    /// Every kind, in table order
    pub const ALL: [EntityKind; 3] = [Self::Dish, Self::Ingredient, Self::Category];

    /// Lower-case label
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dish => "dish",
            Self::Ingredient => "ingredient",
            Self::Category => "category",
        }
    }

    /// Method reported on a successful match
    #[inline]
    #[must_use]
    pub fn method(&self) -> TranslationMethod {
        match self {
            Self::Dish => TranslationMethod::Template,
            Self::Ingredient => TranslationMethod::IngredientTemplate,
            Self::Category => TranslationMethod::CategoryTemplate,
        }
    }

    /// Default minimum confidence for acceptance
    #[inline]
    #[must_use]
    pub fn default_threshold(&self) -> u8 {
        match self {
            Self::Dish => 60,
            Self::Ingredient => 70,
            Self::Category => 80,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EntityKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dish" | "dishes" => Ok(Self::Dish),
            "ingredient" | "ingredients" => Ok(Self::Ingredient),
            "category" | "categories" => Ok(Self::Category),
            other => Err(format!("unknown entity kind: '{other}'")),
        }
    }
}

/// How a result was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TranslationMethod {
    /// Dish table match
    Template,
    /// Ingredient table match
    IngredientTemplate,
    /// Category table match
    CategoryTemplate,
    /// Best score below threshold
    NoMatch,
    /// Request could not be processed
    Error,
}

impl TranslationMethod {
    /// Label as persisted in translation blobs
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::IngredientTemplate => "ingredient_template",
            Self::CategoryTemplate => "category_template",
            Self::NoMatch => "no_match",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for TranslationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a category matched the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MatchType {
    /// Nothing matched
    #[default]
    None,
    /// A free-text pattern matched
    Pattern,
    /// A whole English name matched
    ExactName,
}

/// Outcome of one translation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    /// Whether the best score cleared the threshold
    pub success: bool,
    /// Translated text, or the input unchanged on failure
    pub translation: String,
    /// Best score, 0..=100
    pub confidence: u8,
    /// How the result was produced
    pub method: TranslationMethod,
    /// Winning category on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Input text as given
    pub original: String,
    /// Error message when `method` is `error`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranslationResult {
    /// Failed request, input echoed back
    #[must_use]
    pub fn failed(text: &str, error: impl std::fmt::Display) -> Self {
        Self {
            success: false,
            translation: text.to_string(),
            confidence: 0,
            method: TranslationMethod::Error,
            category: None,
            original: text.to_string(),
            error: Some(error.to_string()),
        }
    }

    /// Whether the translation differs from the input
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        self.translation != self.original
    }
}
