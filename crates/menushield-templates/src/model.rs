//! Template table model
//!
//! Every map is an [`IndexMap`] so iteration follows declaration order.
//! The matcher relies on that order: the first exact name in a category wins
//! and the first category reaching the best score wins.

use crate::error::{TemplateError, TemplateResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One English term with its target-language renderings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedTerm(IndexMap<String, String>);

impl LocalizedTerm {
    /// Build from `(language, text)` pairs
    #[must_use]
    pub fn new<I, L, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (L, T)>,
        L: Into<String>,
        T: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(l, t)| (l.into(), t.into()))
                .collect(),
        )
    }

    /// Rendering for a language; blank renderings count as missing
    #[inline]
    #[must_use]
    pub fn get(&self, language: &str) -> Option<&str> {
        self.0
            .get(language)
            .map(String::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    /// Languages this term has a rendering for
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// One semantic category of a template table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTemplate {
    /// Lower-case substrings suggesting the category
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Whole English names with their translations
    #[serde(default)]
    pub translations: IndexMap<String, LocalizedTerm>,
    /// Sub-terms used for composed translations and bonus scoring
    #[serde(default)]
    pub components: IndexMap<String, LocalizedTerm>,
}

impl CategoryTemplate {
    fn validate(&self, table: &str, name: &str) -> TemplateResult<()> {
        if self.patterns.is_empty() && self.translations.is_empty() {
            return Err(TemplateError::EmptyCategory {
                table: table.to_string(),
                category: name.to_string(),
            });
        }

        let blank = self
            .patterns
            .iter()
            .chain(self.translations.keys())
            .chain(self.components.keys())
            .any(|term| term.trim().is_empty());
        if blank {
            return Err(TemplateError::BlankTerm {
                table: table.to_string(),
                entry: name.to_string(),
            });
        }
        Ok(())
    }
}

/// Ordered categories for one entity kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateTable(IndexMap<String, CategoryTemplate>);

impl TemplateTable {
    /// Build from `(category, template)` pairs in order
    #[must_use]
    pub fn new<I, N>(categories: I) -> Self
    where
        I: IntoIterator<Item = (N, CategoryTemplate)>,
        N: Into<String>,
    {
        Self(categories.into_iter().map(|(n, t)| (n.into(), t)).collect())
    }

    /// Parse and validate a single YAML table
    ///
    /// # Errors
    ///
    /// [`TemplateError::Syntax`] or a validation error for `table`.
    pub fn from_yaml_str(table: &str, source: &str) -> TemplateResult<Self> {
        let parsed: Self =
            serde_yaml::from_str(source).map_err(|e| TemplateError::syntax(table, e))?;
        parsed.validate(table)?;
        Ok(parsed)
    }

    /// Parse and validate a single JSON table
    ///
    /// # Errors
    ///
    /// [`TemplateError::Syntax`] or a validation error for `table`.
    pub fn from_json_str(table: &str, source: &str) -> TemplateResult<Self> {
        let parsed: Self =
            serde_json::from_str(source).map_err(|e| TemplateError::syntax(table, e))?;
        parsed.validate(table)?;
        Ok(parsed)
    }

    /// Categories in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryTemplate)> {
        self.0.iter().map(|(name, t)| (name.as_str(), t))
    }

    /// Category by name
    #[inline]
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&CategoryTemplate> {
        self.0.get(category)
    }

    /// Category names in declaration order
    #[must_use]
    pub fn category_names(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    /// Number of whole-name translations across all categories
    #[must_use]
    pub fn total_templates(&self) -> usize {
        self.0.values().map(|t| t.translations.len()).sum()
    }

    /// Number of categories
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no categories
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reject empty tables, empty categories and blank terms
    ///
    /// # Errors
    ///
    /// Returns the first problem found, in declaration order.
    pub fn validate(&self, table: &str) -> TemplateResult<()> {
        if self.is_empty() {
            return Err(TemplateError::EmptyTable(table.to_string()));
        }
        self.0
            .iter()
            .try_for_each(|(name, template)| template.validate(table, name))
    }
}

/// Ordered phrase substitutions (preparations, connectors)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhraseTable(IndexMap<String, LocalizedTerm>);

impl PhraseTable {
    /// Build from `(phrase, term)` pairs in order
    #[must_use]
    pub fn new<I, P>(phrases: I) -> Self
    where
        I: IntoIterator<Item = (P, LocalizedTerm)>,
        P: Into<String>,
    {
        Self(phrases.into_iter().map(|(p, t)| (p.into(), t)).collect())
    }

    /// Phrases in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LocalizedTerm)> {
        self.0.iter().map(|(phrase, t)| (phrase.as_str(), t))
    }

    /// Number of phrases
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table has no phrases
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Reject blank phrases
    ///
    /// # Errors
    ///
    /// [`TemplateError::BlankTerm`] naming the table.
    pub fn validate(&self, table: &str) -> TemplateResult<()> {
        if self.0.keys().any(|p| p.trim().is_empty()) {
            return Err(TemplateError::BlankTerm {
                table: table.to_string(),
                entry: String::new(),
            });
        }
        Ok(())
    }
}
