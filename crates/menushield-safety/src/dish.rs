//! Dish model
//!
//! A dish exclusively owns an ordered list of components. The flat
//! `ingredients` / `allergen_tags` fields are kept for dishes stored before
//! components existed; see [`crate::legacy`].

use crate::error::{DishError, DishResult};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

/// Kind of component within a dish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    /// The part the dish is built on
    Base,
    /// Main protein
    Protein,
    /// Sauce or dressing
    Sauce,
    /// Side serving
    Side,
    /// Garnish or topping
    Garnish,
    /// Anything else
    #[default]
    Other,
}

impl ComponentType {
    /// Lower-case identifier as stored
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base => "base",
            Self::Protein => "protein",
            Self::Sauce => "sauce",
            Self::Side => "side",
            Self::Garnish => "garnish",
            Self::Other => "other",
        }
    }
}

impl FromStr for ComponentType {
    type Err = DishError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(Self::Base),
            "protein" => Ok(Self::Protein),
            "sauce" => Ok(Self::Sauce),
            "side" => Ok(Self::Side),
            "garnish" => Ok(Self::Garnish),
            "other" => Ok(Self::Other),
            _ => Err(DishError::UnknownComponentType(s.to_string())),
        }
    }
}

impl std::fmt::Display for ComponentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named, ingredient-bearing part of a dish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishComponent {
    /// Component identifier
    pub id: String,
    /// Display name, e.g. "Sauce"
    pub name: String,
    /// Component kind
    #[serde(rename = "type", default)]
    pub component_type: ComponentType,
    /// Ingredient names in recipe order
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Allergens present in this component
    #[serde(default, alias = "allergen_tags")]
    pub allergen_tags: IndexSet<String>,
    /// Cannot be removed from the dish
    #[serde(default, alias = "is_required")]
    pub is_required: bool,
    /// Forced to behave as required
    #[serde(default, alias = "is_locked")]
    pub is_locked: bool,
}

impl DishComponent {
    /// Create an optional, unlocked component with no ingredients
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, component_type: ComponentType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            component_type,
            ingredients: Vec::new(),
            allergen_tags: IndexSet::new(),
            is_required: false,
            is_locked: false,
        }
    }

    /// With ingredient names
    #[must_use]
    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    /// With allergen tags (duplicates collapse, first position kept)
    #[must_use]
    pub fn with_allergens<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allergen_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Mark as required
    #[inline]
    #[must_use]
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }

    /// Mark as locked
    #[inline]
    #[must_use]
    pub fn locked(mut self) -> Self {
        self.is_locked = true;
        self
    }

    /// Whether the guest can ask for this component to be removed or swapped
    #[inline]
    #[must_use]
    pub fn is_modifiable(&self) -> bool {
        !self.is_required && !self.is_locked
    }
}

/// A menu item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dish {
    /// Dish identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Optional menu category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Ordered components; authoritative when non-empty
    #[serde(default)]
    pub components: Vec<DishComponent>,
    /// Legacy flat ingredient list
    #[serde(default)]
    pub ingredients: Vec<String>,
    /// Legacy flat allergen list
    #[serde(default, alias = "allergen_tags")]
    pub allergen_tags: Vec<String>,
}

impl Dish {
    /// Create a dish with no components
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            category: None,
            components: Vec::new(),
            ingredients: Vec::new(),
            allergen_tags: Vec::new(),
        }
    }

    /// Append a component
    #[must_use]
    pub fn with_component(mut self, component: DishComponent) -> Self {
        self.components.push(component);
        self
    }

    /// With menu category
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// With legacy flat fields
    #[must_use]
    pub fn with_legacy_fields<I, S, T, U>(mut self, ingredients: I, allergen_tags: T) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        T: IntoIterator<Item = U>,
        U: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self.allergen_tags = allergen_tags.into_iter().map(Into::into).collect();
        self
    }

    /// Whether the dish predates component decomposition
    #[inline]
    #[must_use]
    pub fn is_legacy(&self) -> bool {
        self.components.is_empty()
    }

    /// Check component ids are unique
    ///
    /// # Errors
    /// - `DishError::DuplicateComponent` on the first repeated id
    pub fn validate(&self) -> DishResult<()> {
        let mut seen = HashSet::with_capacity(self.components.len());
        for component in &self.components {
            if !seen.insert(component.id.as_str()) {
                return Err(DishError::DuplicateComponent {
                    dish_id: self.id.clone(),
                    component_id: component.id.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Stored ingredient with its allergen tags
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Ingredient name, matched exactly against dish ingredient lists
    pub name: String,
    /// Allergen tags as stored (not yet normalized)
    #[serde(default, alias = "allergen_tags")]
    pub allergen_tags: Vec<String>,
}

impl Ingredient {
    /// Create catalog ingredient
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, allergen_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            allergen_tags: allergen_tags.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn component_type_round_trips_through_str() {
        for kind in [
            ComponentType::Base,
            ComponentType::Protein,
            ComponentType::Sauce,
            ComponentType::Side,
            ComponentType::Garnish,
            ComponentType::Other,
        ] {
            assert_eq!(kind.as_str().parse::<ComponentType>().unwrap(), kind);
        }
    }

    #[test]
    fn component_type_rejects_unknown() {
        let err = "topping".parse::<ComponentType>().unwrap_err();
        assert_eq!(err, DishError::UnknownComponentType("topping".to_string()));
    }

    #[test]
    fn modifiable_requires_neither_flag() {
        let optional = DishComponent::new("c", "Sauce", ComponentType::Sauce);
        assert!(optional.is_modifiable());
        assert!(!optional.clone().required().is_modifiable());
        assert!(!optional.locked().is_modifiable());
    }

    #[test]
    fn allergen_tags_deduplicate_in_order() {
        let component = DishComponent::new("c", "Sauce", ComponentType::Sauce)
            .with_allergens(["dairy", "eggs", "dairy"]);
        let tags: Vec<_> = component.allergen_tags.iter().map(String::as_str).collect();
        assert_eq!(tags, vec!["dairy", "eggs"]);
    }

    #[test]
    fn validate_rejects_duplicate_component_ids() {
        let dish = Dish::new("d1", "Soup")
            .with_component(DishComponent::new("c1", "Broth", ComponentType::Base))
            .with_component(DishComponent::new("c1", "Bread", ComponentType::Side));
        assert!(matches!(
            dish.validate(),
            Err(DishError::DuplicateComponent { .. })
        ));
    }

    #[test]
    fn legacy_when_no_components() {
        let dish = Dish::new("d1", "Soup").with_legacy_fields(["water"], ["celery"]);
        assert!(dish.is_legacy());
        assert!(dish.validate().is_ok());
    }
}
