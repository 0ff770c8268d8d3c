//! Error types for the backfill job
//!
//! Stored JSON that fails to parse is not an error; it is reset and logged.
//! Only storage failures and serialization of the new blobs surface here.

use menushield_translate::{EntityKind, TranslateError};

/// Errors raised while backfilling translations
#[derive(Debug, thiserror::Error)]
pub enum BackfillError {
    /// Store could not read or write records
    #[error("store error: {0}")]
    Store(String),

    /// Update names a record the store does not hold
    #[error("unknown {kind} record '{id}'")]
    UnknownRecord {
        /// Entity kind
        kind: EntityKind,
        /// Record id
        id: String,
    },

    /// Blob could not be serialized for write-back
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Translation service could not be built
    #[error("translation error: {0}")]
    Translate(#[from] TranslateError),
}

impl BackfillError {
    /// Create store error
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store(message.into())
    }
}

/// Result type alias for backfill operations
pub type BackfillResult<T> = Result<T, BackfillError>;
