//! Storage port for translatable records

use crate::error::{BackfillError, BackfillResult};
use crate::record::{RecordUpdate, TranslatableRecord};
use async_trait::async_trait;
use menushield_translate::EntityKind;
use parking_lot::RwLock;
use std::collections::HashMap;

/// Where records are read from and written back to
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Every record of a kind, stored order
    async fn fetch_all(&self, kind: EntityKind) -> BackfillResult<Vec<TranslatableRecord>>;

    /// Apply a batch of updates atomically: all or none
    async fn apply_updates(&self, kind: EntityKind, updates: &[RecordUpdate]) -> BackfillResult<()>;
}

/// Process-local store, used by the CLI and tests
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<HashMap<EntityKind, Vec<TranslatableRecord>>>,
}

impl InMemoryStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With records of a kind, replacing any already held
    #[must_use]
    pub fn with_records(self, kind: EntityKind, records: Vec<TranslatableRecord>) -> Self {
        self.tables.write().insert(kind, records);
        self
    }

    /// Snapshot of the records of a kind
    #[must_use]
    pub fn records(&self, kind: EntityKind) -> Vec<TranslatableRecord> {
        self.tables.read().get(&kind).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl EntityStore for InMemoryStore {
    async fn fetch_all(&self, kind: EntityKind) -> BackfillResult<Vec<TranslatableRecord>> {
        Ok(self.records(kind))
    }

    async fn apply_updates(&self, kind: EntityKind, updates: &[RecordUpdate]) -> BackfillResult<()> {
        let mut tables = self.tables.write();
        let records = tables.entry(kind).or_default();

        let mut positions = Vec::with_capacity(updates.len());
        for update in updates {
            let position = records
                .iter()
                .position(|r| r.id == update.id)
                .ok_or_else(|| BackfillError::UnknownRecord {
                    kind,
                    id: update.id.clone(),
                })?;
            positions.push(position);
        }

        for (position, update) in positions.into_iter().zip(updates) {
            records[position].apply(update);
        }
        Ok(())
    }
}
