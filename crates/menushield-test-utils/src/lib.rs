//! Testing utilities for MenuShield workspace
//!
//! Shared fixtures, builders and proptest strategies.

#![allow(missing_docs)]

use menushield_backfill::TranslatableRecord;
use menushield_safety::{ComponentType, Dish, DishComponent};
use proptest::prelude::*;
use std::collections::HashSet;

/// Allergen ids used by generated dishes
pub const ALLERGEN_POOL: [&str; 6] = ["dairy", "gluten", "nuts", "eggs", "soy", "fish"];

pub fn avoid(tags: &[&str]) -> HashSet<String> {
    tags.iter().map(|t| (*t).to_string()).collect()
}

pub fn component(
    id: &str,
    name: &str,
    component_type: ComponentType,
    tags: &[&str],
    required: bool,
) -> DishComponent {
    let component = DishComponent::new(id, name, component_type).with_allergens(tags.iter().copied());
    if required {
        component.required()
    } else {
        component
    }
}

/// Pasta with a required gluten base, an optional dairy sauce and an optional nut garnish
pub fn pasta_alfredo() -> Dish {
    Dish::new("pasta-alfredo", "Pasta Alfredo")
        .with_category("Pasta")
        .with_component(component("pa-base", "Pasta", ComponentType::Base, &["gluten"], true))
        .with_component(component("pa-sauce", "Sauce", ComponentType::Sauce, &["dairy"], false))
        .with_component(component("pa-garnish", "Garnish", ComponentType::Garnish, &["nuts"], false))
}

/// Dish whose only avoidable allergens sit in "Sauce" and "Garnish"
pub fn sauce_and_garnish_dish() -> Dish {
    Dish::new("bowl", "Grain Bowl")
        .with_component(component("b-base", "Base", ComponentType::Base, &[], true))
        .with_component(component("b-sauce", "Sauce", ComponentType::Sauce, &["sesame", "soy"], false))
        .with_component(component("b-garnish", "Garnish", ComponentType::Garnish, &["nuts"], false))
}

/// Legacy dish with only flat fields
pub fn legacy_toast() -> Dish {
    Dish::new("toast", "Toast").with_legacy_fields(["Bread", "Butter"], ["gluten", "dairy"])
}

pub fn record(id: &str, name: &str) -> TranslatableRecord {
    TranslatableRecord::new(id, name)
}

pub fn record_with_stored(
    id: &str,
    name: &str,
    translations: &str,
    translated_languages: &str,
) -> TranslatableRecord {
    TranslatableRecord::new(id, name)
        .with_translations(translations)
        .with_translated_languages(translated_languages)
}

fn arb_component_type() -> impl Strategy<Value = ComponentType> {
    prop_oneof![
        Just(ComponentType::Base),
        Just(ComponentType::Protein),
        Just(ComponentType::Sauce),
        Just(ComponentType::Side),
        Just(ComponentType::Garnish),
        Just(ComponentType::Other),
    ]
}

pub fn arb_tags() -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(ALLERGEN_POOL.to_vec(), 0..=ALLERGEN_POOL.len())
        .prop_map(|tags| tags.into_iter().map(str::to_string).collect())
}

pub fn arb_component(index: usize) -> impl Strategy<Value = DishComponent> {
    (arb_component_type(), arb_tags(), any::<bool>(), any::<bool>()).prop_map(
        move |(kind, tags, is_required, is_locked)| {
            let mut component =
                DishComponent::new(format!("c{index}"), format!("Component {index}"), kind)
                    .with_allergens(tags);
            component.is_required = is_required;
            component.is_locked = is_locked;
            component
        },
    )
}

pub fn arb_dish() -> impl Strategy<Value = Dish> {
    (0..6usize)
        .prop_flat_map(|n| (0..n).map(arb_component).collect::<Vec<_>>())
        .prop_map(|components| {
            components
                .into_iter()
                .fold(Dish::new("generated", "Generated"), Dish::with_component)
        })
}

pub fn arb_avoid_set() -> impl Strategy<Value = HashSet<String>> {
    arb_tags().prop_map(|tags| tags.into_iter().collect())
}
