//! Allergen catalog and ingredient lookups
//!
//! Allergens are opaque lower-case identifiers. The catalog below is what the
//! guest filter offers; tags outside it are still compared by value.

use crate::dish::Ingredient;
use serde::Serialize;
use std::collections::BTreeSet;

/// Allergen display entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllergenInfo {
    /// Stable identifier used in allergen tags
    pub id: &'static str,
    /// English display name
    pub name: &'static str,
    /// UI color hint
    pub color: &'static str,
}

const fn info(id: &'static str, name: &'static str, color: &'static str) -> AllergenInfo {
    AllergenInfo { id, name, color }
}

/// Most common allergens, shown first in the guest filter
pub const COMMON_ALLERGENS: [AllergenInfo; 8] = [
    info("dairy", "Dairy", "blue"),
    info("gluten", "Gluten", "yellow"),
    info("nuts", "Tree Nuts", "brown"),
    info("peanuts", "Peanuts", "orange"),
    info("shellfish", "Shellfish", "red"),
    info("fish", "Fish", "cyan"),
    info("eggs", "Eggs", "yellow"),
    info("soy", "Soy", "green"),
];

/// Every allergen the filter can search, common ones first
pub const ALL_ALLERGENS: [AllergenInfo; 18] = [
    COMMON_ALLERGENS[0],
    COMMON_ALLERGENS[1],
    COMMON_ALLERGENS[2],
    COMMON_ALLERGENS[3],
    COMMON_ALLERGENS[4],
    COMMON_ALLERGENS[5],
    COMMON_ALLERGENS[6],
    COMMON_ALLERGENS[7],
    info("sesame", "Sesame", "tan"),
    info("sulfites", "Sulfites", "purple"),
    info("mustard", "Mustard", "yellow"),
    info("celery", "Celery", "green"),
    info("lupin", "Lupin", "pink"),
    info("molluscs", "Molluscs", "teal"),
    info("corn", "Corn", "yellow"),
    info("coconut", "Coconut", "white"),
    info("nightshades", "Nightshades", "red"),
    info("citrus", "Citrus", "orange"),
];

/// Legacy and alternate spellings mapped to their canonical id
const ALIASES: [(&str, &str); 5] = [
    ("milk", "dairy"),
    ("tree_nuts", "nuts"),
    ("tree nuts", "nuts"),
    ("shellfish", "crustaceans"),
    ("sulphites", "sulfites"),
];

/// Ingredient name to the allergens it usually carries
const INGREDIENT_ALLERGENS: &[(&str, &[&str])] = &[
    // Dairy
    ("milk", &["dairy"]),
    ("cheese", &["dairy"]),
    ("butter", &["dairy"]),
    ("cream", &["dairy"]),
    ("yogurt", &["dairy"]),
    ("mozzarella", &["dairy"]),
    ("parmesan", &["dairy"]),
    ("cheddar", &["dairy"]),
    // Gluten
    ("wheat flour", &["gluten"]),
    ("bread", &["gluten"]),
    ("pasta", &["gluten"]),
    ("noodles", &["gluten"]),
    ("soy sauce", &["gluten", "soy"]),
    ("beer", &["gluten"]),
    // Fish & seafood
    ("salmon", &["fish"]),
    ("tuna", &["fish"]),
    ("cod", &["fish"]),
    ("shrimp", &["shellfish"]),
    ("crab", &["shellfish"]),
    ("lobster", &["shellfish"]),
    ("mussels", &["molluscs"]),
    ("oysters", &["molluscs"]),
    // Nuts
    ("almonds", &["nuts"]),
    ("walnuts", &["nuts"]),
    ("cashews", &["nuts"]),
    ("pistachios", &["nuts"]),
    ("peanuts", &["peanuts"]),
    ("peanut butter", &["peanuts"]),
    // Eggs
    ("eggs", &["eggs"]),
    ("egg whites", &["eggs"]),
    ("egg yolks", &["eggs"]),
    ("mayonnaise", &["eggs"]),
    // Soy
    ("tofu", &["soy"]),
    ("tempeh", &["soy"]),
    ("edamame", &["soy"]),
    ("soy milk", &["soy"]),
    // Other
    ("sesame oil", &["sesame"]),
    ("tahini", &["sesame"]),
    ("wine", &["sulfites"]),
    ("mustard", &["mustard"]),
    ("celery", &["celery"]),
];

/// Look up a catalog entry by id
#[must_use]
pub fn allergen_info(id: &str) -> Option<&'static AllergenInfo> {
    ALL_ALLERGENS.iter().find(|a| a.id == id)
}

/// Filter the catalog by a free-text query
///
/// A blank query yields the common allergens; otherwise every entry whose
/// name or id contains the query, case-insensitively.
#[must_use]
pub fn search_allergens(query: &str) -> Vec<&'static AllergenInfo> {
    if query.trim().is_empty() {
        return COMMON_ALLERGENS.iter().collect();
    }

    let query = query.to_lowercase();
    ALL_ALLERGENS
        .iter()
        .filter(|a| a.name.to_lowercase().contains(&query) || a.id.contains(&query))
        .collect()
}

/// Canonical lower-case id for a stored allergen tag
#[must_use]
pub fn normalize_allergen_id(id: &str) -> String {
    let lower = id.to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == lower)
        .map_or(lower, |(_, canonical)| (*canonical).to_string())
}

/// Allergens an ingredient name suggests, for staff entering new ingredients
///
/// Exact table hits win; otherwise entries where either name contains the
/// other are merged in table order.
#[must_use]
pub fn suggested_allergens(ingredient_name: &str) -> Vec<String> {
    let name = ingredient_name.to_lowercase();

    if let Some((_, allergens)) = INGREDIENT_ALLERGENS.iter().find(|(k, _)| *k == name) {
        return allergens.iter().map(|a| (*a).to_string()).collect();
    }

    let mut suggestions: Vec<String> = Vec::new();
    for (ingredient, allergens) in INGREDIENT_ALLERGENS {
        if name.contains(ingredient) || ingredient.contains(name.as_str()) {
            for allergen in *allergens {
                if !suggestions.iter().any(|s| s == allergen) {
                    suggestions.push((*allergen).to_string());
                }
            }
        }
    }
    suggestions
}

/// Allergens carried by the selected ingredients according to the catalog
///
/// Ingredients are matched by exact name; unknown names contribute nothing.
/// The result is normalized, de-duplicated and sorted.
#[must_use]
pub fn calculate_allergens_from_ingredients(
    selected: &[String],
    catalog: &[Ingredient],
) -> Vec<String> {
    let mut allergens = BTreeSet::new();

    for name in selected {
        match catalog.iter().find(|ing| &ing.name == name) {
            Some(ingredient) => {
                allergens.extend(ingredient.allergen_tags.iter().map(|t| normalize_allergen_id(t)));
            }
            None => tracing::trace!(ingredient = %name, "ingredient not in catalog"),
        }
    }

    allergens.into_iter().collect()
}
