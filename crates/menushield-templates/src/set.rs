//! Complete template set and its loaders

use crate::error::{TemplateError, TemplateResult};
use crate::model::{PhraseTable, TemplateTable};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;

const DISHES_YAML: &str = include_str!("../data/dishes.yaml");
const INGREDIENTS_YAML: &str = include_str!("../data/ingredients.yaml");
const CATEGORIES_YAML: &str = include_str!("../data/categories.yaml");
const PREPARATIONS_YAML: &str = include_str!("../data/preparations.yaml");
const DESCRIPTIONS_YAML: &str = include_str!("../data/descriptions.yaml");

static BUILTIN: Lazy<Result<Arc<TemplateSet>, String>> = Lazy::new(|| {
    TemplateSet::from_yaml_sources(
        DISHES_YAML,
        INGREDIENTS_YAML,
        CATEGORIES_YAML,
        PREPARATIONS_YAML,
        DESCRIPTIONS_YAML,
    )
    .map(Arc::new)
    .map_err(|e| e.to_string())
});

/// The five tables making up a template set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// Dish name categories
    Dishes,
    /// Ingredient name categories
    Ingredients,
    /// Menu category name categories
    Categories,
    /// Preparation verbs
    Preparations,
    /// Connectors and descriptive words
    Descriptions,
}

impl TableKind {
    /// Every table, in load order
    pub const ALL: [TableKind; 5] = [
        Self::Dishes,
        Self::Ingredients,
        Self::Categories,
        Self::Preparations,
        Self::Descriptions,
    ];

    /// Table name used in errors and logs
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dishes => "dishes",
            Self::Ingredients => "ingredients",
            Self::Categories => "categories",
            Self::Preparations => "preparations",
            Self::Descriptions => "descriptions",
        }
    }

    /// File name inside a template directory
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.yaml", self.as_str())
    }
}

/// Validated dish, ingredient and category tables plus phrase tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    dishes: TemplateTable,
    ingredients: TemplateTable,
    categories: TemplateTable,
    preparations: PhraseTable,
    descriptions: PhraseTable,
}

impl TemplateSet {
    /// Assemble and validate a set from already-built tables
    ///
    /// # Errors
    ///
    /// Returns the first validation failure.
    pub fn new(
        dishes: TemplateTable,
        ingredients: TemplateTable,
        categories: TemplateTable,
        preparations: PhraseTable,
        descriptions: PhraseTable,
    ) -> TemplateResult<Self> {
        dishes.validate(TableKind::Dishes.as_str())?;
        ingredients.validate(TableKind::Ingredients.as_str())?;
        categories.validate(TableKind::Categories.as_str())?;
        preparations.validate(TableKind::Preparations.as_str())?;
        descriptions.validate(TableKind::Descriptions.as_str())?;

        Ok(Self {
            dishes,
            ingredients,
            categories,
            preparations,
            descriptions,
        })
    }

    /// Tables bundled with the crate, parsed once per process
    ///
    /// # Errors
    ///
    /// [`TemplateError::Builtin`] if the bundled data fails to load.
    pub fn builtin() -> TemplateResult<Arc<Self>> {
        match &*BUILTIN {
            Ok(set) => Ok(Arc::clone(set)),
            Err(msg) => Err(TemplateError::Builtin(msg.clone())),
        }
    }

    /// Parse a set from five YAML documents
    ///
    /// # Errors
    ///
    /// Syntax or validation errors naming the offending table.
    pub fn from_yaml_sources(
        dishes: &str,
        ingredients: &str,
        categories: &str,
        preparations: &str,
        descriptions: &str,
    ) -> TemplateResult<Self> {
        Self::new(
            parse_yaml(TableKind::Dishes, dishes)?,
            parse_yaml(TableKind::Ingredients, ingredients)?,
            parse_yaml(TableKind::Categories, categories)?,
            parse_yaml(TableKind::Preparations, preparations)?,
            parse_yaml(TableKind::Descriptions, descriptions)?,
        )
    }

    /// Load a set from a directory holding one file per table
    ///
    /// Each table is read from `<kind>.yaml`, or `<kind>.json` when no YAML
    /// file exists.
    ///
    /// # Errors
    ///
    /// IO, syntax or validation errors.
    pub fn from_dir(dir: impl AsRef<Path>) -> TemplateResult<Self> {
        let dir = dir.as_ref();
        let set = Self::new(
            load_table(dir, TableKind::Dishes)?,
            load_table(dir, TableKind::Ingredients)?,
            load_table(dir, TableKind::Categories)?,
            load_table(dir, TableKind::Preparations)?,
            load_table(dir, TableKind::Descriptions)?,
        )?;
        tracing::info!(
            dir = %dir.display(),
            categories = set.dishes.len(),
            templates = set.total_templates(),
            "loaded template set"
        );
        Ok(set)
    }

    /// Dish name table
    #[inline]
    #[must_use]
    pub fn dishes(&self) -> &TemplateTable {
        &self.dishes
    }

    /// Ingredient name table
    #[inline]
    #[must_use]
    pub fn ingredients(&self) -> &TemplateTable {
        &self.ingredients
    }

    /// Menu category name table
    #[inline]
    #[must_use]
    pub fn categories(&self) -> &TemplateTable {
        &self.categories
    }

    /// Preparation verb substitutions
    #[inline]
    #[must_use]
    pub fn preparations(&self) -> &PhraseTable {
        &self.preparations
    }

    /// Connector substitutions
    #[inline]
    #[must_use]
    pub fn descriptions(&self) -> &PhraseTable {
        &self.descriptions
    }

    /// Dish category names, declaration order
    #[must_use]
    pub fn category_names(&self) -> Vec<String> {
        self.dishes.category_names()
    }

    /// Whole-name dish templates across all dish categories
    #[must_use]
    pub fn total_templates(&self) -> usize {
        self.dishes.total_templates()
    }
}

fn parse_yaml<T: DeserializeOwned>(kind: TableKind, source: &str) -> TemplateResult<T> {
    serde_yaml::from_str(source).map_err(|e| TemplateError::syntax(kind.as_str(), e))
}

fn parse_json<T: DeserializeOwned>(kind: TableKind, source: &str) -> TemplateResult<T> {
    serde_json::from_str(source).map_err(|e| TemplateError::syntax(kind.as_str(), e))
}

fn load_table<T: DeserializeOwned>(dir: &Path, kind: TableKind) -> TemplateResult<T> {
    let yaml = dir.join(kind.file_name());
    if yaml.exists() {
        let source =
            std::fs::read_to_string(&yaml).map_err(|e| TemplateError::io_error(&yaml, e))?;
        return parse_yaml(kind, &source);
    }

    let json = dir.join(format!("{}.json", kind.as_str()));
    let source =
        std::fs::read_to_string(&json).map_err(|e| TemplateError::io_error(&json, e))?;
    parse_json(kind, &source)
}
