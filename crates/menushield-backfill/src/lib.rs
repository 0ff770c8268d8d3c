//! MenuShield Translation Backfill
//!
//! Fills the persisted `translations` / `translatedLanguages` fields of
//! stored dishes, ingredients and categories using the template translation
//! engine, and reads them back for guest display.
//!
//! # Core Concepts
//!
//! - [`EntityStore`]: storage port; [`InMemoryStore`] ships with the crate
//! - [`Backfiller`]: batched translate-and-write-back job
//! - [`TranslationsBlob`]: the persisted `{lang: {name, confidence, method}}`
//!   shape, parsed leniently
//! - [`display`]: source-language fallbacks for guest rendering
//!
//! # Example
//!
//! ```rust,no_run
//! use menushield_backfill::{BackfillConfig, Backfiller, InMemoryStore, TranslatableRecord};
//! use menushield_translate::{EntityKind, TemplateTranslationService, TranslatorConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = InMemoryStore::new().with_records(
//!     EntityKind::Dish,
//!     vec![TranslatableRecord::new("d1", "Caesar Salad")],
//! );
//! let service = Arc::new(TemplateTranslationService::new(TranslatorConfig::default())?);
//! let report = Backfiller::new(service, BackfillConfig::default())
//!     .run(&store, EntityKind::Dish)
//!     .await?;
//! assert_eq!(report.updated, 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod blob;
pub mod display;
pub mod error;
pub mod record;
pub mod runner;
pub mod store;

pub use blob::{parse_translated_languages, parse_translations, TranslationEntry, TranslationsBlob};
pub use display::translated_name;
pub use error::{BackfillError, BackfillResult};
pub use record::{RecordUpdate, TranslatableRecord};
pub use runner::{
    translation_status, BackfillConfig, BackfillReport, Backfiller, TranslationStatus,
    DEFAULT_BATCH_SIZE,
};
pub use store::{EntityStore, InMemoryStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
