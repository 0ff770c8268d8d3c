//! MenuShield Dish Safety Engine
//!
//! Classifies a dish against the allergens a guest wants to avoid.
//!
//! # Core Concepts
//!
//! - [`Dish`]: a menu item decomposed into ordered [`DishComponent`]s
//! - [`analyze_dish_safety`]: safe / modifiable / unsafe classification with
//!   a modification suggestion for the guest
//! - [`migrate_dish_to_components`]: adapter for dishes stored before
//!   components existed
//! - [`allergen`]: allergen catalog, id normalization and ingredient lookups
//!
//! # Example
//!
//! ```rust
//! use menushield_safety::{analyze_dish_safety, ComponentType, Dish, DishComponent, SafetyStatus};
//! use std::collections::HashSet;
//!
//! let dish = Dish::new("d1", "Pasta Alfredo")
//!     .with_component(
//!         DishComponent::new("c1", "Pasta", ComponentType::Base)
//!             .with_allergens(["gluten"])
//!             .required(),
//!     )
//!     .with_component(
//!         DishComponent::new("c2", "Sauce", ComponentType::Sauce).with_allergens(["dairy"]),
//!     );
//!
//! let avoid: HashSet<String> = ["dairy".to_string()].into_iter().collect();
//! let status = analyze_dish_safety(&dish, &avoid);
//! assert_eq!(status.status, SafetyStatus::Modifiable);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod allergen;
pub mod analyzer;
pub mod dish;
pub mod error;
pub mod legacy;

pub use allergen::{
    allergen_info, calculate_allergens_from_ingredients, normalize_allergen_id,
    search_allergens, suggested_allergens, AllergenInfo, ALL_ALLERGENS, COMMON_ALLERGENS,
};
pub use analyzer::{
    analyze_dish_safety, modification_suggestion, partition_menu, AllergenMatch,
    DishSafetyStatus, MenuPartition, SafetyStatus,
};
pub use dish::{ComponentType, Dish, DishComponent, Ingredient};
pub use error::{DishError, DishResult};
pub use legacy::migrate_dish_to_components;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the safety engine
    pub use crate::analyzer::{analyze_dish_safety, DishSafetyStatus, SafetyStatus};
    pub use crate::dish::{ComponentType, Dish, DishComponent};
    pub use crate::legacy::migrate_dish_to_components;
}
