//! Dish safety analysis
//!
//! A dish is:
//! - **safe** when no component carries an avoided allergen
//! - **unsafe** when an avoided allergen sits in a required or locked component
//! - **modifiable** otherwise; every offending component can be removed or swapped
//!
//! Matches are reported in component order, then tag order within a
//! component, so identical inputs always produce identical output.

use crate::dish::{ComponentType, Dish};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Safety classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyStatus {
    /// Nothing the guest avoids
    Safe,
    /// Avoided allergens only in removable components
    Modifiable,
    /// Avoided allergen baked into a required component
    Unsafe,
}

impl SafetyStatus {
    /// Lower-case label
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Modifiable => "modifiable",
            Self::Unsafe => "unsafe",
        }
    }
}

impl std::fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One avoided allergen found in one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllergenMatch {
    /// Allergen identifier
    pub tag: String,
    /// Component name
    pub component: String,
    /// Component kind
    pub component_type: ComponentType,
    /// Component can be removed or swapped
    pub can_modify: bool,
}

/// Result of analyzing one dish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DishSafetyStatus {
    /// Classification
    pub status: SafetyStatus,
    /// Every avoided allergen found, for display
    pub allergens: Vec<AllergenMatch>,
    /// Guest-facing advice, present only for modifiable dishes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modification_suggestion: Option<String>,
}

impl DishSafetyStatus {
    /// Safe status with no matches
    #[inline]
    #[must_use]
    pub fn safe() -> Self {
        Self {
            status: SafetyStatus::Safe,
            allergens: Vec::new(),
            modification_suggestion: None,
        }
    }

    /// Component names carrying an avoided allergen, first-seen order, no repeats
    #[must_use]
    pub fn offending_components(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for m in &self.allergens {
            if !names.contains(&m.component.as_str()) {
                names.push(&m.component);
            }
        }
        names
    }
}

/// Classify a dish against the guest's avoided allergens
///
/// The dish must already be component-shaped (see
/// [`crate::legacy::migrate_dish_to_components`]). A dish without components
/// is trivially safe. Unknown allergen tags never match and are ignored.
#[must_use]
pub fn analyze_dish_safety(dish: &Dish, avoided: &HashSet<String>) -> DishSafetyStatus {
    let allergens: Vec<AllergenMatch> = dish
        .components
        .iter()
        .flat_map(|component| {
            component
                .allergen_tags
                .iter()
                .filter(|tag| avoided.contains(tag.as_str()))
                .map(move |tag| AllergenMatch {
                    tag: tag.clone(),
                    component: component.name.clone(),
                    component_type: component.component_type,
                    can_modify: component.is_modifiable(),
                })
        })
        .collect();

    if allergens.is_empty() {
        return DishSafetyStatus::safe();
    }

    if allergens.iter().any(|m| !m.can_modify) {
        tracing::debug!(dish_id = %dish.id, matches = allergens.len(), "dish unsafe");
        return DishSafetyStatus {
            status: SafetyStatus::Unsafe,
            allergens,
            modification_suggestion: None,
        };
    }

    let mut status = DishSafetyStatus {
        status: SafetyStatus::Modifiable,
        allergens,
        modification_suggestion: None,
    };
    let suggestion = modification_suggestion(&status.offending_components());
    status.modification_suggestion = suggestion;
    tracing::debug!(dish_id = %dish.id, matches = status.allergens.len(), "dish modifiable");
    status
}

/// Guest-facing advice naming the components to remove or swap
///
/// Returns `None` for an empty list.
#[must_use]
pub fn modification_suggestion(components: &[&str]) -> Option<String> {
    match components {
        [] => None,
        [only] => Some(format!(
            "This dish contains an allergen in the {only} component. \
             You may be able to enjoy it by asking your server to remove or swap the {only}."
        )),
        [first, second] => Some(format!(
            "This dish contains allergens in the {first} and {second} components. \
             You may be able to enjoy it by asking your server to remove or swap these components."
        )),
        [head @ .., last] => Some(format!(
            "This dish contains allergens in the {}, and {last} components. \
             You may be able to enjoy it by asking your server to remove or swap these components.",
            head.join(", ")
        )),
    }
}

/// Dishes of a menu grouped by classification
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuPartition {
    /// Safe dishes, menu order
    pub safe: Vec<(String, DishSafetyStatus)>,
    /// Modifiable dishes, menu order
    pub modifiable: Vec<(String, DishSafetyStatus)>,
    /// Unsafe dishes, menu order
    #[serde(rename = "unsafe")]
    pub unsafe_dishes: Vec<(String, DishSafetyStatus)>,
}

impl MenuPartition {
    /// Total number of dishes partitioned
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.safe.len() + self.modifiable.len() + self.unsafe_dishes.len()
    }

    /// Whether no dishes were partitioned
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Analyze every dish of a menu and group them for the guest lists
#[must_use]
pub fn partition_menu<'a, I>(dishes: I, avoided: &HashSet<String>) -> MenuPartition
where
    I: IntoIterator<Item = &'a Dish>,
{
    let mut partition = MenuPartition::default();
    for dish in dishes {
        let status = analyze_dish_safety(dish, avoided);
        let bucket = match status.status {
            SafetyStatus::Safe => &mut partition.safe,
            SafetyStatus::Modifiable => &mut partition.modifiable,
            SafetyStatus::Unsafe => &mut partition.unsafe_dishes,
        };
        bucket.push((dish.id.clone(), status));
    }
    partition
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dish::DishComponent;

    fn avoid(tags: &[&str]) -> HashSet<String> {
        tags.iter().map(|t| (*t).to_string()).collect()
    }

    fn burger() -> Dish {
        Dish::new("burger", "Burger")
            .with_component(
                DishComponent::new("bun", "Bun", ComponentType::Base)
                    .with_allergens(["gluten", "sesame"])
                    .required(),
            )
            .with_component(
                DishComponent::new("patty", "Patty", ComponentType::Protein).required(),
            )
            .with_component(
                DishComponent::new("cheese", "Cheese", ComponentType::Garnish)
                    .with_allergens(["dairy"]),
            )
            .with_component(
                DishComponent::new("sauce", "Sauce", ComponentType::Sauce)
                    .with_allergens(["eggs", "mustard", "dairy"]),
            )
    }

    #[test]
    fn no_avoided_allergens_is_safe() {
        let status = analyze_dish_safety(&burger(), &HashSet::new());
        assert_eq!(status, DishSafetyStatus::safe());
    }

    #[test]
    fn dish_without_components_is_safe() {
        let status = analyze_dish_safety(&Dish::new("x", "Air"), &avoid(&["gluten"]));
        assert_eq!(status.status, SafetyStatus::Safe);
    }

    #[test]
    fn required_component_makes_unsafe() {
        let status = analyze_dish_safety(&burger(), &avoid(&["gluten", "dairy"]));
        assert_eq!(status.status, SafetyStatus::Unsafe);
        assert!(status.modification_suggestion.is_none());
        // modifiable matches are still reported for display
        let components: Vec<_> = status.allergens.iter().map(|m| m.component.as_str()).collect();
        assert_eq!(components, vec!["Bun", "Cheese", "Sauce"]);
    }

    #[test]
    fn locked_component_makes_unsafe() {
        let dish = Dish::new("d", "Salad").with_component(
            DishComponent::new("c", "Dressing", ComponentType::Sauce)
                .with_allergens(["mustard"])
                .locked(),
        );
        let status = analyze_dish_safety(&dish, &avoid(&["mustard"]));
        assert_eq!(status.status, SafetyStatus::Unsafe);
        assert!(!status.allergens[0].can_modify);
    }

    #[test]
    fn optional_components_make_modifiable() {
        let status = analyze_dish_safety(&burger(), &avoid(&["dairy", "eggs"]));
        assert_eq!(status.status, SafetyStatus::Modifiable);

        let found: Vec<_> = status
            .allergens
            .iter()
            .map(|m| (m.tag.as_str(), m.component.as_str()))
            .collect();
        assert_eq!(
            found,
            vec![("dairy", "Cheese"), ("eggs", "Sauce"), ("dairy", "Sauce")]
        );
        assert_eq!(status.offending_components(), vec!["Cheese", "Sauce"]);
        assert_eq!(
            status.modification_suggestion.as_deref(),
            Some(
                "This dish contains allergens in the Cheese and Sauce components. \
                 You may be able to enjoy it by asking your server to remove or swap these components."
            )
        );
    }

    #[test]
    fn suggestion_single_component() {
        assert_eq!(
            modification_suggestion(&["Sauce"]).unwrap(),
            "This dish contains an allergen in the Sauce component. \
             You may be able to enjoy it by asking your server to remove or swap the Sauce."
        );
    }

    #[test]
    fn suggestion_oxford_join() {
        assert_eq!(
            modification_suggestion(&["Sauce", "Garnish", "Side"]).unwrap(),
            "This dish contains allergens in the Sauce, Garnish, and Side components. \
             You may be able to enjoy it by asking your server to remove or swap these components."
        );
        assert!(modification_suggestion(&[]).is_none());
    }

    #[test]
    fn partition_keeps_menu_order() {
        let salad = Dish::new("salad", "Salad").with_component(
            DishComponent::new("greens", "Greens", ComponentType::Base).required(),
        );
        let menu = vec![burger(), salad];

        let partition = partition_menu(&menu, &avoid(&["gluten"]));
        assert_eq!(partition.len(), 2);
        assert_eq!(partition.safe[0].0, "salad");
        assert_eq!(partition.unsafe_dishes[0].0, "burger");
        assert!(partition.modifiable.is_empty());
    }

    #[test]
    fn status_serializes_in_camel_case() {
        let status = analyze_dish_safety(&burger(), &avoid(&["eggs"]));
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["status"], "modifiable");
        assert_eq!(json["allergens"][0]["componentType"], "sauce");
        assert_eq!(json["allergens"][0]["canModify"], true);
        assert!(json["modificationSuggestion"].is_string());
    }
}
