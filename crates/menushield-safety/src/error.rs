//! Error types for the dish model
//!
//! Safety analysis itself is total; errors only arise when building the
//! model from loosely typed input.

/// Errors while building dishes from external data
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DishError {
    /// Component type string is not one of the known kinds
    #[error("unknown component type: '{0}'")]
    UnknownComponentType(String),

    /// Two components of one dish share an id
    #[error("duplicate component id '{component_id}' in dish '{dish_id}'")]
    DuplicateComponent {
        /// Owning dish
        dish_id: String,
        /// Repeated component id
        component_id: String,
    },
}

/// Result type alias for dish model operations
pub type DishResult<T> = Result<T, DishError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_component_type_display() {
        let err = DishError::UnknownComponentType("topping".to_string());
        assert_eq!(err.to_string(), "unknown component type: 'topping'");
    }

    #[test]
    fn duplicate_component_display() {
        let err = DishError::DuplicateComponent {
            dish_id: "d1".to_string(),
            component_id: "c1".to_string(),
        };
        assert!(err.to_string().contains("duplicate component id 'c1'"));
    }
}
