//! Application configuration file

use anyhow::{Context, Result};
use menushield_backfill::BackfillConfig;
use menushield_translate::TranslatorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Contents of the optional `--config` TOML file
///
/// ```toml
/// [translator]
/// cache_capacity = 5000
/// languages = ["fi", "sv"]
///
/// [translator.thresholds]
/// dish = 65
///
/// [backfill]
/// batch_size = 25
/// batch_delay_ms = 100
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct AppConfig {
    pub(crate) translator: TranslatorConfig,
    pub(crate) backfill: BackfillConfig,
}

impl AppConfig {
    /// Load from `path`, or defaults when no file was given
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = toml::from_str(&source)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }
}
