//! MenuShield Template Translation Engine
//!
//! Heuristic, table-driven translation of dish, ingredient and menu category
//! names from English into the languages of the bundled templates. This is a
//! template filler for human-reviewed batch work, not a general translator;
//! the confidence score tells reviewers how much to trust each result.
//!
//! # Core Concepts
//!
//! - [`TemplateMatcher`]: scores every category of a table and composes a
//!   translation from the winner
//! - [`TemplateTranslationService`]: the matcher behind a bounded cache and
//!   request counters
//! - [`EntityKind`]: selects table, threshold (60 / 70 / 80) and method label
//!
//! # Example
//!
//! ```rust,no_run
//! use menushield_translate::{TemplateTranslationService, TranslatorConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = TemplateTranslationService::new(TranslatorConfig::default())?;
//! let result = service.translate_dish_name("Margherita Pizza", "fi").await;
//! assert!(result.success);
//! assert_eq!(result.translation, "Margherita");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod cache;
pub mod compose;
pub mod config;
pub mod error;
pub mod matcher;
pub mod service;
pub mod stats;
pub mod types;

pub use cache::{CacheKey, CacheStats, TranslationCache};
pub use config::{Thresholds, TranslatorConfig, DEFAULT_CACHE_CAPACITY};
pub use error::{TranslateError, TranslateResult};
pub use matcher::{CategoryScore, TemplateMatcher};
pub use service::{EntityTranslations, NamedEntity, TemplateTranslationService};
pub use stats::ServiceStats;
pub use types::{EntityKind, MatchType, TranslationMethod, TranslationResult};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for translating names
    pub use crate::config::TranslatorConfig;
    pub use crate::service::{NamedEntity, TemplateTranslationService};
    pub use crate::types::{EntityKind, TranslationResult};
}
