//! In-memory record store

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::Mutex;

use super::RecordRepository;
use crate::models::{PersistedRecord, RecordKey, RecordKind, ValidatedRecord};

#[derive(Default)]
struct MemoryState {
    next_id: i64,
    rows: HashMap<RecordKind, Vec<PersistedRecord>>,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// One lock guards lookup and write, so concurrent upserts of the same key
/// serialize and never produce a duplicate row.
#[derive(Default)]
pub struct InMemoryRecordRepository {
    state: Mutex<MemoryState>,
}

impl InMemoryRecordRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record of a kind, in insertion order
    pub async fn records(&self, kind: RecordKind) -> Vec<PersistedRecord> {
        let state = self.state.lock().await;
        state.rows.get(&kind).cloned().unwrap_or_default()
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn find_by_key(
        &self,
        kind: RecordKind,
        key: &RecordKey,
    ) -> Result<Option<PersistedRecord>> {
        let state = self.state.lock().await;
        Ok(state
            .rows
            .get(&kind)
            .and_then(|rows| rows.iter().find(|row| row.matches_key(key)))
            .cloned())
    }

    async fn insert(&self, record: &ValidatedRecord) -> Result<PersistedRecord> {
        let mut state = self.state.lock().await;
        let now = Utc::now();
        let row = PersistedRecord {
            kind: record.kind,
            id: state.next_id(),
            values: record.values.clone(),
            created_at: now,
            updated_at: now,
        };
        state.rows.entry(record.kind).or_default().push(row.clone());
        Ok(row)
    }

    async fn upsert(&self, record: &ValidatedRecord) -> Result<PersistedRecord> {
        let key = record
            .key()
            .ok_or_else(|| anyhow!("{} record has no natural key to upsert on", record.kind))?;

        let mut state = self.state.lock().await;
        let now = Utc::now();

        let existing = state
            .rows
            .get_mut(&record.kind)
            .and_then(|rows| rows.iter_mut().find(|row| row.matches_key(&key)));

        if let Some(row) = existing {
            row.values = record.values.clone();
            row.updated_at = now;
            return Ok(row.clone());
        }

        let row = PersistedRecord {
            kind: record.kind,
            id: state.next_id(),
            values: record.values.clone(),
            created_at: now,
            updated_at: now,
        };
        state.rows.entry(record.kind).or_default().push(row.clone());
        Ok(row)
    }

    async fn count(&self, kind: RecordKind) -> Result<i64> {
        let state = self.state.lock().await;
        Ok(state.rows.get(&kind).map_or(0, |rows| rows.len() as i64))
    }
}
