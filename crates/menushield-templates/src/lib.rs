//! MenuShield Translation Templates
//!
//! Read-only lookup tables mapping English menu vocabulary to Finnish and
//! Swedish.
//!
//! # Core Concepts
//!
//! - [`TemplateTable`]: ordered categories, each with substring `patterns`,
//!   whole-name `translations` and optional `components`
//! - [`PhraseTable`]: ordered preparation verbs and connectors used when
//!   composing a translation from parts
//! - [`TemplateSet`]: the dish, ingredient and category tables plus both
//!   phrase tables, validated together
//!
//! Declaration order is part of the data: substring matching takes the first
//! declared key an input contains, and phrases are substituted in order.
//!
//! # Example
//!
//! ```rust
//! use menushield_templates::TemplateSet;
//!
//! let set = TemplateSet::builtin().unwrap();
//! let pizza = set.dishes().get("pizza").unwrap();
//! assert_eq!(pizza.translations["margherita"].get("fi"), Some("Margherita"));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod model;
pub mod set;

pub use error::{TemplateError, TemplateResult};
pub use model::{CategoryTemplate, LocalizedTerm, PhraseTable, TemplateTable};
pub use set::{TableKind, TemplateSet};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
