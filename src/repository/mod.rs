//! Record store abstraction
//!
//! The intake service only talks to [`RecordRepository`]. Postgres backs it in
//! the server; [`InMemoryRecordRepository`] backs it in tests.

use anyhow::Result;
use async_trait::async_trait;

use crate::models::{PersistedRecord, RecordKey, RecordKind, ValidatedRecord};

pub mod memory;

pub use memory::InMemoryRecordRepository;

#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Look up the stored record with the given natural key
    async fn find_by_key(&self, kind: RecordKind, key: &RecordKey)
        -> Result<Option<PersistedRecord>>;

    /// Always create a new row
    async fn insert(&self, record: &ValidatedRecord) -> Result<PersistedRecord>;

    /// Create the row, or replace every column of the row sharing its natural
    /// key. Lookup and write are one atomic step; `created_at` is preserved.
    async fn upsert(&self, record: &ValidatedRecord) -> Result<PersistedRecord>;

    async fn count(&self, kind: RecordKind) -> Result<i64>;

    /// Upsert kinds with a natural key, insert the rest
    async fn save(&self, record: &ValidatedRecord) -> Result<PersistedRecord> {
        if record.kind.schema().natural_key.is_some() {
            self.upsert(record).await
        } else {
            self.insert(record).await
        }
    }
}
