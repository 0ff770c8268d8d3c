//! Legacy dish adapter
//!
//! Dishes stored before component decomposition carry only flat
//! `ingredients` / `allergen_tags`. Run them through
//! [`migrate_dish_to_components`] at the repository boundary so the safety
//! engine only ever sees component-shaped dishes.

use crate::allergen::calculate_allergens_from_ingredients;
use crate::dish::{ComponentType, Dish, DishComponent, Ingredient};

/// Name given to the synthetic component of a legacy dish
pub const LEGACY_BASE_NAME: &str = "Base";

/// Convert a flat legacy dish into a single-component dish
///
/// Dishes that already have components are returned unchanged. Otherwise one
/// required `base` component is derived from the flat fields. When an
/// ingredient catalog is supplied the allergens are recomputed from it,
/// else the stored flat tags are used as-is. The dish-level tags are updated
/// to match the new component.
#[must_use]
pub fn migrate_dish_to_components(dish: &Dish, catalog: Option<&[Ingredient]>) -> Dish {
    if !dish.components.is_empty() {
        return dish.clone();
    }

    let allergen_tags = match catalog {
        Some(catalog) => calculate_allergens_from_ingredients(&dish.ingredients, catalog),
        None => dish.allergen_tags.clone(),
    };

    tracing::debug!(
        dish_id = %dish.id,
        allergens = allergen_tags.len(),
        from_catalog = catalog.is_some(),
        "migrated legacy dish to base component"
    );

    let base = DishComponent::new(
        format!("{}-base", dish.id),
        LEGACY_BASE_NAME,
        ComponentType::Base,
    )
    .with_ingredients(dish.ingredients.iter().cloned())
    .with_allergens(allergen_tags.iter().cloned())
    .required();

    let mut migrated = dish.clone();
    migrated.components = vec![base];
    migrated.allergen_tags = allergen_tags;
    migrated
}
